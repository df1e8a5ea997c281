use crate::pack::{LanguageCode, ModuleKey, ValidationError};

/// Path of a pack archive relative to the download base URL.
///
/// Layout:
/// - `b/a/backend-l10n/backend-l10n-fr.v12.zip` for built-in modules
/// - `a/n/anext-l10n/anext-l10n-hu.zip` for everything else
pub fn package_path(
    module: &ModuleKey,
    language: &LanguageCode,
    host_major_version: &str,
    builtin: bool,
) -> Result<String, ValidationError> {
    let mut chars = module.as_str().chars();
    let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
        return Err(ValidationError::MalformedModuleKey(module.as_str().to_owned()));
    };

    let suffix = if builtin {
        format!(".v{host_major_version}")
    } else {
        String::new()
    };

    Ok(format!(
        "{first}/{second}/{module}-l10n/{module}-l10n-{language}{suffix}.zip"
    ))
}

/// Full download URL of a pack archive below `base_url`.
pub fn build_package_url(
    base_url: &str,
    module: &ModuleKey,
    language: &LanguageCode,
    host_major_version: &str,
    builtin: bool,
) -> Result<String, ValidationError> {
    let path = package_path(module, language, host_major_version, builtin)?;
    if base_url.ends_with('/') {
        Ok(format!("{base_url}{path}"))
    } else {
        Ok(format!("{base_url}/{path}"))
    }
}

/// Major release of a dotted version string: `12.4.3` gives `12`.
pub fn major_version(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}
