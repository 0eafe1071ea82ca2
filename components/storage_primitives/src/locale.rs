//! Locale-aware rendering of scaled values.
//!
//! Rendering itself is pure: [`format_scaled`] takes the [`Locale`] as an
//! argument. The ambient default used by `Display` is resolved in this order:
//!
//! 1. an override installed with [`set_default_locale`] or
//!    [`override_default_locale`]
//! 2. the first non-empty of `LC_ALL`, `LC_NUMERIC`, `LANG`
//! 3. [`Locale::root`]
//!
//! The override is process-wide. Code that needs deterministic output while
//! other threads may change it should call `format_with` with an explicit
//! locale instead of relying on `Display`.

use crate::decimal::DecimalRepr;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variables consulted for the ambient locale, highest priority first
pub const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_NUMERIC", "LANG"];

/// Languages that write a comma before the fraction digits
const COMMA_LANGUAGES: &[&str] = &[
    "af", "az", "be", "bg", "bs", "ca", "cs", "da", "de", "el", "es", "et", "eu", "fi", "fo",
    "fr", "gl", "hr", "hu", "hy", "id", "is", "it", "ka", "kk", "ky", "lt", "lv", "mk", "mn",
    "nb", "nl", "nn", "no", "pl", "pt", "ro", "ru", "sk", "sl", "sq", "sr", "sv", "tr", "uk",
    "uz", "vi",
];

/// Regions whose language is in [`COMMA_LANGUAGES`] but which use a point
const POINT_REGIONS: &[(&str, &str)] = &[
    ("de", "ch"),
    ("de", "li"),
    ("it", "ch"),
    ("es", "mx"),
    ("es", "us"),
];

static DEFAULT_OVERRIDE: RwLock<Option<Locale>> = parking_lot::const_rwlock(None);

/// The numeric formatting conventions of a language/region
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    tag: String,
    decimal_separator: char,
}

impl Locale {
    /// Create from a BCP 47 tag (`"de-DE"`) or a POSIX locale name
    /// (`"de_DE.UTF-8"`, `"C"`)
    ///
    /// Unknown languages use `.` as decimal separator.
    ///
    /// # Examples
    /// ```
    /// # use storage_primitives::Locale;
    /// assert_eq!(Locale::new("fr-FR").decimal_separator(), ',');
    /// assert_eq!(Locale::new("ja_JP.UTF-8").decimal_separator(), '.');
    /// ```
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let decimal_separator = separator_for(&tag);
        Self {
            tag,
            decimal_separator,
        }
    }

    /// A locale with an explicit decimal separator, bypassing the language table
    pub fn with_decimal_separator(tag: impl Into<String>, decimal_separator: char) -> Self {
        Self {
            tag: tag.into(),
            decimal_separator,
        }
    }

    /// The language-neutral locale (`.` separator)
    pub fn root() -> Self {
        Self::with_decimal_separator("und", '.')
    }

    /// Resolve from `LC_ALL`, `LC_NUMERIC` and `LANG`, ignoring any override
    pub fn from_env() -> Self {
        for var in LOCALE_ENV_VARS {
            match env::var(var) {
                Ok(value) if !value.is_empty() => {
                    tracing::debug!("Resolved locale {:?} from {}", value, var);
                    return Self::new(value);
                }
                _ => {}
            }
        }

        tracing::debug!("No locale set in environment, using root locale");
        Self::root()
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::root()
    }
}

fn separator_for(tag: &str) -> char {
    // "de_DE.UTF-8@euro" -> ["de", "de"]; "de-CH" -> ["de", "ch"]
    let name = tag.split(['.', '@']).next().unwrap_or_default();
    let mut parts = name.split(['-', '_']).map(str::to_ascii_lowercase);
    let language = parts.next().unwrap_or_default();
    // skip script subtags like "Latn"; regions are two letters or three digits
    let region = parts.find(|part| {
        part.len() == 2 || (part.len() == 3 && part.bytes().all(|b| b.is_ascii_digit()))
    });

    let point_region = region.as_deref().is_some_and(|region| {
        POINT_REGIONS
            .iter()
            .any(|(lang, reg)| *lang == language && *reg == region)
    });

    if COMMA_LANGUAGES.contains(&language.as_str()) && !point_region {
        ','
    } else {
        '.'
    }
}

/// The locale `Display` renders with right now
pub fn default_locale() -> Locale {
    if let Some(locale) = DEFAULT_OVERRIDE.read().clone() {
        return locale;
    }
    Locale::from_env()
}

/// Install a process-wide default, returning the previous override
pub fn set_default_locale(locale: Locale) -> Option<Locale> {
    tracing::debug!("Default locale set to {}", locale.tag());
    DEFAULT_OVERRIDE.write().replace(locale)
}

/// Remove the override so the environment decides again
pub fn clear_default_locale() -> Option<Locale> {
    tracing::debug!("Default locale override cleared");
    DEFAULT_OVERRIDE.write().take()
}

/// Install `locale` as the default until the returned guard is dropped
///
/// # Examples
/// ```
/// # use storage_primitives::{override_default_locale, Locale, StorageSize};
/// {
///     let _guard = override_default_locale(Locale::new("de-DE"));
///     assert_eq!(StorageSize::from_bytes(1_500).to_string(), "1,50 kB");
/// }
/// ```
#[must_use = "the override is removed when the guard is dropped"]
pub fn override_default_locale(locale: Locale) -> LocaleOverride {
    LocaleOverride {
        previous: set_default_locale(locale),
    }
}

/// Restores the previous default locale override on drop
#[derive(Debug)]
pub struct LocaleOverride {
    previous: Option<Locale>,
}

impl Drop for LocaleOverride {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(previous) => {
                set_default_locale(previous);
            }
            None => {
                clear_default_locale();
            }
        }
    }
}

/// Render `value` with exactly two fraction digits followed by `symbol`.
///
/// Rounds half up on the shortest decimal representation of `value`, so
/// `1.005` renders as `1.01`. No digit grouping is applied.
pub fn format_scaled(value: f64, symbol: &str, locale: &Locale) -> String {
    match DecimalRepr::from_f64(value) {
        Some(repr) => {
            let (negative, integer, fraction) = repr.round_half_up(2);
            format!(
                "{}{}{}{} {}",
                if negative { "-" } else { "" },
                integer,
                locale.decimal_separator(),
                fraction,
                symbol
            )
        }
        None => format!("{} {}", value, symbol),
    }
}
