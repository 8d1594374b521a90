//! Translation lookups.

use souq_core::Language;
use souq_core::i18n::translate as lookup;

use super::CliError;

/// Each key paired with its translation, `None` when the key is unknown.
///
/// Unlike the storefront there is no English fallback here, so a key missing
/// from one language shows up as missing.
#[must_use]
pub fn lookup_keys(language: Language, keys: &[String]) -> Vec<(String, Option<&'static str>)> {
    keys.iter()
        .map(|key| (key.clone(), lookup(language, key)))
        .collect()
}

/// Print translations for `keys`, failing when any are missing.
#[allow(clippy::print_stdout)]
pub fn translate(language: &str, keys: &[String]) -> Result<(), CliError> {
    let language = language
        .parse::<Language>()
        .map_err(|message| CliError::InvalidArgument {
            field: "language",
            message,
        })?;

    let results = lookup_keys(language, keys);
    let mut missing = 0;
    for (key, value) in &results {
        if let Some(value) = value {
            println!("{key} = {value}");
        } else {
            missing += 1;
            println!("{key} = (missing)");
        }
    }

    if missing > 0 {
        return Err(CliError::MissingKeys(missing));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_keys_marks_unknown() {
        let keys = vec!["nav.home".to_string(), "nav.nowhere".to_string()];
        let results = lookup_keys(Language::Fr, &keys);
        assert_eq!(results.first().and_then(|(_, v)| *v), Some("Accueil"));
        assert_eq!(results.get(1).and_then(|(_, v)| *v), None);
    }

    #[test]
    fn test_unknown_language_is_invalid_argument() {
        let err = translate("de", &["nav.home".to_string()]);
        assert!(matches!(err, Err(CliError::InvalidArgument { field: "language", .. })));
    }

    #[test]
    fn test_missing_keys_are_counted() {
        let err = translate("en", &["nav.home".to_string(), "no.such.key".to_string()]);
        assert!(matches!(err, Err(CliError::MissingKeys(1))));
    }
}
