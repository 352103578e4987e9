use filedrop_core::ExtensionPolicy;
use uuid::Uuid;

/// Longest extension that still fits a 255-byte file name after the
/// 36-character UUID prefix.
pub const MAX_EXTENSION_BYTES: usize = 255 - 36;

/// Filename validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Unsupported file type: '{extension}'")]
    UnsupportedFileType { extension: String },
}

/// Extension of a client-supplied filename, leading dot included.
///
/// Only the last path component is considered and the case is preserved.
/// Names without a dot, and dotfiles such as `.bashrc`, have no extension
/// and yield an empty string.
pub fn extract_extension(filename: &str) -> &str {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    if base == ".." {
        return "";
    }

    match base.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &base[idx..],
    }
}

/// Storage name for an accepted upload: a fresh v4 UUID followed by the
/// extension exactly as supplied.
pub fn generate_storage_name(extension: &str) -> String {
    format!("{}{}", Uuid::new_v4(), extension)
}

/// Accepts or rejects filenames against an [`ExtensionPolicy`].
///
/// Pure: no filesystem access, no side effects.
#[derive(Debug, Clone, Default)]
pub struct UploadValidator {
    policy: ExtensionPolicy,
}

impl UploadValidator {
    pub fn new(policy: ExtensionPolicy) -> Self {
        Self { policy }
    }

    /// Validate `filename` and return its extension.
    ///
    /// Extensions that could never form a storable file name are rejected
    /// under every policy, `AllowAny` included.
    pub fn validate(&self, filename: &str) -> Result<String, ValidationError> {
        let extension = extract_extension(filename);

        let storable = extension.len() <= MAX_EXTENSION_BYTES && !extension.contains('\0');
        if !storable || !self.policy.permits(extension) {
            return Err(ValidationError::UnsupportedFileType {
                extension: extension.to_string(),
            });
        }

        Ok(extension.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_extension() {
        assert_eq!(extract_extension("photo.png"), ".png");
        assert_eq!(extract_extension("archive.tar.gz"), ".gz");
        assert_eq!(extract_extension("PHOTO.JPG"), ".JPG");
        assert_eq!(extract_extension("README"), "");
        assert_eq!(extract_extension(".bashrc"), "");
        assert_eq!(extract_extension(".."), "");
        assert_eq!(extract_extension("trailing."), ".");
        assert_eq!(extract_extension("dir.d/photo"), "");
        assert_eq!(extract_extension("C:\\pics\\cat.gif"), ".gif");
    }

    #[test]
    fn test_validate_accepts_allowed_extensions() {
        let validator = UploadValidator::default();
        for name in ["a.jpg", "b.jpeg", "c.png", "d.gif"] {
            assert!(validator.validate(name).is_ok(), "{} should be accepted", name);
        }
        assert_eq!(validator.validate("photo.png").unwrap(), ".png");
    }

    #[test]
    fn test_validate_rejects_other_extensions() {
        let validator = UploadValidator::default();

        assert_eq!(
            validator.validate("archive.zip"),
            Err(ValidationError::UnsupportedFileType {
                extension: ".zip".to_string()
            })
        );
        assert_eq!(
            validator.validate("noext"),
            Err(ValidationError::UnsupportedFileType {
                extension: String::new()
            })
        );
        assert!(validator.validate("SHOUT.PNG").is_err());
    }

    #[test]
    fn test_validate_allow_any() {
        let validator = UploadValidator::new(ExtensionPolicy::AllowAny);
        assert_eq!(validator.validate("archive.zip").unwrap(), ".zip");
        assert_eq!(validator.validate("Makefile").unwrap(), "");
    }

    #[test]
    fn test_validate_rejects_unstorable_extensions() {
        let validator = UploadValidator::new(ExtensionPolicy::AllowAny);

        let longest = format!("a.{}", "x".repeat(MAX_EXTENSION_BYTES - 1));
        let ext = validator.validate(&longest).unwrap();
        assert_eq!(generate_storage_name(&ext).len(), 255);

        let too_long = format!("a.{}", "x".repeat(300));
        assert!(matches!(
            validator.validate(&too_long),
            Err(ValidationError::UnsupportedFileType { .. })
        ));
        assert!(validator.validate("a.p\0ng").is_err());
    }

    #[test]
    fn test_generate_storage_name_shape() {
        let name = generate_storage_name(".png");
        assert!(name.ends_with(".png"));

        let uuid_part = name.strip_suffix(".png").unwrap();
        let parsed = Uuid::parse_str(uuid_part).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(uuid_part.len(), 36);
    }

    #[test]
    fn test_generate_storage_name_without_extension() {
        let name = generate_storage_name("");
        assert!(Uuid::parse_str(&name).is_ok());
    }

    #[test]
    fn test_generate_storage_name_is_unique() {
        let names: std::collections::HashSet<String> =
            (0..1000).map(|_| generate_storage_name(".jpg")).collect();
        assert_eq!(names.len(), 1000);
    }
}
