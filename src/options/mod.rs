//! Scene configuration with TOML preset support.
//!
//! Every tweakable constant (particle and ornament counts, cone geometry,
//! transition rates, topper behaviour) lives here. Options serialize to and
//! from TOML presets; sections use `#[serde(default)]` so a preset only
//! needs the values it changes.

mod accent;
mod foliage;
mod ornaments;
mod transition;

use std::path::Path;

pub use accent::AccentOptions;
pub use foliage::FoliageOptions;
pub use ornaments::OrnamentOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use transition::TransitionOptions;

use crate::error::EvergreenError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[foliage]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Seed for reproducible generation; entropy-seeded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(skip)]
    pub seed: Option<u64>,
    /// Smoothing rates and easing.
    pub transition: TransitionOptions,
    /// Particle field.
    pub foliage: FoliageOptions,
    /// Ornament batches.
    pub ornaments: OrnamentOptions,
    /// Tree topper.
    pub accent: AccentOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, EvergreenError> {
        let content = std::fs::read_to_string(path).map_err(EvergreenError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse and validate options from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, EvergreenError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| EvergreenError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), EvergreenError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| EvergreenError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(EvergreenError::Io)?;
        }
        std::fs::write(path, content).map_err(EvergreenError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Highest tree-formation point of the foliage (including jitter) and
    /// ornament cones. The topper sits [`AccentOptions::clearance`] above
    /// it.
    #[must_use]
    pub fn apex_height(&self) -> f32 {
        let f = &self.foliage;
        let o = &self.ornaments;
        let foliage = f.cone_height + f.vertical_offset + f.jitter.max(0.0);
        foliage.max(o.cone_height + o.vertical_offset)
    }

    /// Reject values the generators cannot work with: non-finite or
    /// negative geometry, and rates outside (0, 1].
    pub fn validate(&self) -> Result<(), EvergreenError> {
        let t = &self.transition;
        check_rate("transition.foliage_rate", t.foliage_rate)?;
        check_rate("transition.ornament_rate", t.ornament_rate)?;
        check_rate("transition.accent_rate", t.accent_rate)?;

        let f = &self.foliage;
        check_non_negative("foliage.cone_height", f.cone_height)?;
        check_non_negative("foliage.cone_radius", f.cone_radius)?;
        check_non_negative("foliage.jitter", f.jitter)?;
        check_non_negative("foliage.scatter_radius", f.scatter_radius)?;
        check_finite("foliage.vertical_offset", f.vertical_offset)?;
        for c in f.primary_color.iter().chain(&f.secondary_color) {
            check_non_negative("foliage color", *c)?;
        }

        let o = &self.ornaments;
        check_non_negative("ornaments.cone_height", o.cone_height)?;
        check_finite("ornaments.vertical_offset", o.vertical_offset)?;

        let a = &self.accent;
        check_non_negative("accent.clearance", a.clearance)?;
        check_non_negative("accent.scatter_radius", a.scatter_radius)?;
        check_non_negative("accent.scale", a.scale)?;
        for r in a.tumble_rates {
            check_finite("accent.tumble_rates", r)?;
        }
        check_rate("accent.settle_rate", a.settle_rate)?;
        if !(0.0..1.0).contains(&a.settle_threshold) {
            return Err(invalid("accent.settle_threshold", a.settle_threshold));
        }
        Ok(())
    }
}

fn invalid(name: &str, value: f32) -> EvergreenError {
    log::warn!("rejected option {name} = {value}");
    EvergreenError::InvalidOptions(format!("{name} = {value}"))
}

fn check_finite(name: &str, value: f32) -> Result<(), EvergreenError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, value))
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<(), EvergreenError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value))
    }
}

fn check_rate(name: &str, value: f32) -> Result<(), EvergreenError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn seed_round_trips_through_toml() {
        let opts = Options {
            seed: Some(42),
            ..Options::default()
        };
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(parsed.seed, Some(42));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[foliage]
count = 500

[transition]
easing = "linear"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.foliage.count, 500);
        assert_eq!(opts.transition.easing, EasingFunction::Linear);
        // Everything else should be default
        assert_eq!(opts.foliage.cone_radius, 5.5);
        assert_eq!(opts.transition.ornament_rate, 0.03);
        assert_eq!(opts.ornaments, OrnamentOptions::default());
        assert_eq!(opts.seed, None);
    }

    #[test]
    fn default_colors() {
        let foliage = FoliageOptions::default();
        let primary = foliage.primary().to_array();
        assert!((primary[0] - 15.0 / 255.0).abs() < 1e-6);
        assert!((primary[1] - 74.0 / 255.0).abs() < 1e-6);
        assert!((primary[2] - 40.0 / 255.0).abs() < 1e-6);
        assert!((foliage.secondary().r - 212.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(Options::default().validate().is_ok());

        let mut opts = Options::default();
        opts.transition.foliage_rate = 0.0;
        assert!(matches!(
            opts.validate(),
            Err(EvergreenError::InvalidOptions(_))
        ));

        let mut opts = Options::default();
        opts.foliage.cone_radius = -1.0;
        assert!(opts.validate().is_err());

        let mut opts = Options::default();
        opts.accent.scatter_radius = f32::NAN;
        assert!(opts.validate().is_err());

        let err = Options::from_toml("[transition]\naccent_rate = 1.5\n")
            .unwrap_err();
        assert!(err.to_string().contains("accent_rate"));
    }

    #[test]
    fn apex_height_follows_the_cones() {
        let mut opts = Options::default();
        // 14 - 2 + 0.25 jitter
        assert!((opts.apex_height() - 12.25).abs() < 1e-6);
        opts.ornaments.cone_height = 20.0;
        assert!((opts.apex_height() - 18.0).abs() < 1e-6);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml("[foliage\ncount = 1").unwrap_err();
        assert!(matches!(err, EvergreenError::OptionsParse(_)));
    }

    #[test]
    fn foliage_generation_changes() {
        let base = FoliageOptions::default();
        let recolored = FoliageOptions {
            primary_color: [1.0, 0.0, 0.0],
            ..base.clone()
        };
        assert!(!base.affects_generation(&recolored));
        let denser = FoliageOptions {
            count: base.count + 1,
            ..base.clone()
        };
        assert!(base.affects_generation(&denser));
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("evergreen-presets-{}", std::process::id()));
        let opts = Options {
            seed: Some(7),
            ornaments: OrnamentOptions {
                base_count: 100,
                ..OrnamentOptions::default()
            },
            ..Options::default()
        };
        opts.save(&dir.join("winter.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();
        Options::default().save(&dir.join("autumn.toml")).unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["autumn", "winter"]);
        assert_eq!(Options::load(&dir.join("winter.toml")).unwrap(), opts);
        assert!(matches!(
            Options::load(&dir.join("missing.toml")),
            Err(EvergreenError::Io(_))
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("transition"));
        assert!(props.contains_key("foliage"));
        assert!(props.contains_key("ornaments"));
        assert!(props.contains_key("accent"));
        assert!(!props.contains_key("seed"));

        let foliage = &props["foliage"]["properties"];
        assert!(foliage.get("count").is_some());
        assert!(foliage.get("cone_radius").is_some());
        assert!(foliage.get("primary_color").is_none());
        assert!(foliage.get("vertical_offset").is_none());

        let accent = &props["accent"]["properties"];
        assert!(accent.get("scale").is_some());
        assert!(accent.get("tumble_rates").is_none());
    }
}
