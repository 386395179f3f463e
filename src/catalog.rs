//! Provider catalogs: closed enumerations mapped to Sarvam wire codes.
//!
//! Every value a caller may pass for a language, script, gender, mode or
//! formatting option is one of the enums below. Callers use the
//! human-readable name (`HINDI`, `FORMAL`); the provider only understands the
//! wire code (`hi-IN`, `formal`). Lookups are exact and case-sensitive.

use std::fmt;

/// Source language sent when the caller leaves it to provider autodetection
pub const AUTO_SOURCE_LANGUAGE: &str = "auto";

/// Name reported for provider codes that are not in a catalog
pub const UNKNOWN: &str = "UNKNOWN";

/// A closed set of names with a 1:1 mapping to provider wire codes.
pub trait Catalog: Sized + Copy + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Human-readable identifier accepted from callers (e.g. "HINDI").
    fn name(self) -> &'static str;

    /// Exact string the provider expects (e.g. "hi-IN").
    fn code(self) -> &'static str;

    /// Resolve a caller-supplied name. `None` if the name is not a member.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|member| member.name() == name)
    }

    /// Reverse lookup from a provider wire code.
    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|member| member.code() == code)
    }

    /// All accepted names, in declaration order.
    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|member| member.name()).collect()
    }
}

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        pub enum $ty:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($name:literal, $code:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $ty {
            $( $(#[$vmeta])* $variant ),+
        }

        impl Catalog for $ty {
            const ALL: &'static [Self] = &[$( $ty::$variant ),+];

            fn name(self) -> &'static str {
                match self {
                    $( $ty::$variant => $name ),+
                }
            }

            fn code(self) -> &'static str {
                match self {
                    $( $ty::$variant => $code ),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

catalog! {
    /// Languages supported by translation, transliteration and identification.
    pub enum Language {
        English => ("ENGLISH", "en-IN"),
        Hindi => ("HINDI", "hi-IN"),
        Bengali => ("BENGALI", "bn-IN"),
        Gujarati => ("GUJARATI", "gu-IN"),
        Kannada => ("KANNADA", "kn-IN"),
        Malayalam => ("MALAYALAM", "ml-IN"),
        Marathi => ("MARATHI", "mr-IN"),
        Odia => ("ODIA", "od-IN"),
        Punjabi => ("PUNJABI", "pa-IN"),
        Tamil => ("TAMIL", "ta-IN"),
        Telugu => ("TELUGU", "te-IN"),
    }
}

catalog! {
    /// ISO 15924 scripts reported by language identification.
    pub enum Script {
        /// Romanized text
        Latin => ("LATIN", "Latn"),
        /// Hindi, Marathi
        Devanagari => ("DEVANAGARI", "Deva"),
        Bengali => ("BENGALI", "Beng"),
        Gujarati => ("GUJARATI", "Gujr"),
        Kannada => ("KANNADA", "Knda"),
        Malayalam => ("MALAYALAM", "Mlym"),
        Odia => ("ODIA", "Orya"),
        /// Punjabi
        Gurmukhi => ("GURMUKHI", "Guru"),
        Tamil => ("TAMIL", "Taml"),
        Telugu => ("TELUGU", "Telu"),
    }
}

catalog! {
    /// Speaker gender, used by the provider for gendered verb forms.
    #[derive(Default)]
    pub enum Gender {
        Male => ("MALE", "Male"),
        #[default]
        Female => ("FEMALE", "Female"),
    }
}

catalog! {
    /// Register of the translated output.
    #[derive(Default)]
    pub enum TranslationMode {
        #[default]
        Formal => ("FORMAL", "formal"),
        ColloquialModern => ("COLLOQUIAL_MODERN", "modern-colloquial"),
        ColloquialClassic => ("COLLOQUIAL_CLASSIC", "classic-colloquial"),
        CodeMixed => ("CODE_MIXED", "code_mixed"),
    }
}

catalog! {
    /// Script style of translated output.
    #[derive(Default)]
    pub enum OutputScript {
        /// No transliteration; the provider sends the literal string "null"
        Null => ("NULL", "null"),
        Roman => ("ROMAN", "roman"),
        #[default]
        FullyNative => ("FULLY_NATIVE", "fully-native"),
        SpokenFormInNative => ("SPOKEN_FORM_IN_NATIVE", "spoken-form-in-native"),
    }
}

catalog! {
    /// Digits used for numbers in the output.
    #[derive(Default)]
    pub enum NumeralsFormat {
        #[default]
        International => ("INTERNATIONAL", "international"),
        Native => ("NATIVE", "native"),
    }
}

catalog! {
    /// Language numbers are spelled out in when spoken form is enabled.
    #[derive(Default)]
    pub enum SpokenFormNumeralsLanguage {
        English => ("ENGLISH", "english"),
        #[default]
        Native => ("NATIVE", "native"),
    }
}

catalog! {
    /// Provider endpoints, appended to the base URL.
    pub enum Task {
        Translate => ("TRANSLATE", "translate"),
        LanguageIdentification => ("LANGUAGE_IDENTIFICATION", "text-lid"),
        Transliterate => ("TRANSLITERATE", "transliterate"),
    }
}

impl Task {
    /// Path suffix of the endpoint
    pub fn path(self) -> &'static str {
        self.code()
    }
}

/// Human-readable name for a provider code, or [`UNKNOWN`].
pub fn name_for_code<C: Catalog>(code: Option<&str>) -> &'static str {
    code.and_then(C::from_code)
        .map(|member| member.name())
        .unwrap_or(UNKNOWN)
}
