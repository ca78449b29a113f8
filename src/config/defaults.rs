//! Default configuration values

use super::schema::Config;
use std::collections::BTreeMap;

/// Fill colours for resource boxes, by kind
///
/// Kinds not listed here are drawn white.
pub const KIND_COLORS: &[(&str, &str)] = &[
    ("Deployment", "#E6F3FF"),
    ("Service", "#FFE6E6"),
    ("ConfigMap", "#E6FFE6"),
    ("Secret", "#FFE6FF"),
    ("PersistentVolumeClaim", "#FFFFE6"),
    ("Container", "#F0F0F0"),
    ("Ingress", "#FFF0E0"),
    ("HTTPProxy", "#E0FFF0"),
    ("Certificate", "#FFE0FF"),
    ("SealedSecret", "#E0E0FF"),
];

/// Fill colour for kinds without a palette entry
pub const DEFAULT_KIND_COLOR: &str = "#FFFFFF";

/// Get the default configuration
pub fn default_config() -> Config {
    Config::default()
}

/// Built-in palette with `overrides` applied on top
pub fn palette_with(overrides: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut palette: BTreeMap<String, String> = KIND_COLORS
        .iter()
        .map(|(kind, color)| (kind.to_string(), color.to_string()))
        .collect();
    palette.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    palette
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_overrides() {
        let mut overrides = BTreeMap::new();
        overrides.insert("Deployment".to_string(), "#000000".to_string());
        overrides.insert("ConfigMap".to_string(), "#111111".to_string());
        overrides.insert("Job".to_string(), "#222222".to_string());

        let palette = palette_with(&overrides);
        assert_eq!(palette["Deployment"], "#000000");
        assert_eq!(palette["Service"], "#FFE6E6");
        assert_eq!(palette["Job"], "#222222");
        assert_eq!(palette.len(), KIND_COLORS.len() + 1);
    }
}
