use crate::catalog::{Language, LocaleCatalog};
use crate::pack::LanguageCode;

/// Languages the host ships labels for out of the box.
const BUILTIN: &[(&str, &str)] = &[
    ("default", "English"),
    ("af", "Afrikaans"),
    ("ar", "Arabic"),
    ("bs", "Bosnian"),
    ("bg", "Bulgarian"),
    ("ca", "Catalan"),
    ("ch", "Chinese (Simpl.)"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("eo", "Esperanto"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("eu", "Basque"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fo", "Faroese"),
    ("fr", "French"),
    ("fr_CA", "French (Canada)"),
    ("gl", "Galician"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ka", "Georgian"),
    ("kl", "Greenlandic"),
    ("km", "Khmer"),
    ("ko", "Korean"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("mi", "Maori"),
    ("mk", "Macedonian"),
    ("ms", "Malay"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("pt_BR", "Brazilian Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("rw", "Kinyarwanda"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sn", "Shona (Bantu)"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese (Trad.)"),
];

/// The host's built-in language table, optionally extended with extra
/// languages from configuration.
///
/// A regional locale such as `fr_CA` depends on its base language `fr`.
#[derive(Debug, Clone)]
pub struct BuiltinLocales {
    languages: Vec<Language>,
}

impl BuiltinLocales {
    pub fn new() -> Self {
        Self {
            languages: BUILTIN
                .iter()
                .map(|(code, name)| Language::new(*code, *name))
                .collect(),
        }
    }

    /// Add languages missing from the built-in table. Codes that already
    /// exist keep their built-in name.
    pub fn with_extra(mut self, extra: Vec<Language>) -> Self {
        for language in extra {
            if language.code.as_str().is_empty() || self.is_available(&language.code) {
                continue;
            }
            self.languages.push(language);
        }
        self
    }
}

impl Default for BuiltinLocales {
    fn default() -> Self {
        Self::new()
    }
}

impl LocaleCatalog for BuiltinLocales {
    fn available_languages(&self) -> Vec<Language> {
        self.languages.clone()
    }

    fn is_available(&self, code: &LanguageCode) -> bool {
        self.languages.iter().any(|language| &language.code == code)
    }

    fn locale_dependencies(&self, code: &LanguageCode) -> Vec<LanguageCode> {
        match code.as_str().split_once('_') {
            Some((base, _)) if !base.is_empty() => {
                let base = LanguageCode::new(base);
                if self.is_available(&base) {
                    vec![base]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }
}
