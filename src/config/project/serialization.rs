//! Mapping between TOML tables and ProjectConfig

use std::path::{Path, PathBuf};

use super::{IncludeSpec, MetadataEntry, ProjectConfig};
use crate::error::{Result, config};
use crate::path_utils::to_forward_slashes;
use crate::source::Dependency;

/// Keys understood inside a pychub table
pub const FIELD_KEYS: &[&str] = &[
    "wheel",
    "add_wheels",
    "entrypoint",
    "entrypoint_args",
    "includes",
    "metadata",
    "pre_script",
    "post_script",
    "pre_scripts",
    "post_scripts",
    "chub",
    "enabled",
    "scripts",
];

/// Build a config from a pychub table
///
/// Returns `None` when the table sets `enabled = false`. The caller sets
/// [`ProjectConfig::table`].
pub fn from_table(table: &toml::Table, path: &Path) -> Result<Option<ProjectConfig>> {
    let fields = Fields { table, path };

    if fields.bool("enabled")? == Some(false) {
        tracing::info!(path = %path.display(), "Packaging disabled by enabled = false");
        return Ok(None);
    }

    for key in table.keys() {
        if !FIELD_KEYS.contains(&key.as_str()) {
            tracing::warn!(path = %path.display(), key = %key, "Ignoring unknown key");
        }
    }

    let add_wheels = fields
        .array("add_wheels")?
        .iter()
        .map(Dependency::from_toml)
        .collect::<Result<Vec<_>>>()?;

    let includes = fields
        .strings("includes")?
        .iter()
        .map(|s| IncludeSpec::parse(s))
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(ProjectConfig {
        wheel: fields.string("wheel")?.map(PathBuf::from),
        add_wheels,
        includes,
        entrypoint: fields.string("entrypoint")?,
        entrypoint_args: fields.strings("entrypoint_args")?,
        metadata: fields.metadata()?,
        pre_scripts: fields.scripts("pre")?,
        post_scripts: fields.scripts("post")?,
        chub: fields.string("chub")?.map(PathBuf::from),
        table: Default::default(),
    }))
}

/// Render a config as a pychub table; empty lists and unset values are omitted
pub fn to_table(config: &ProjectConfig) -> toml::Table {
    let mut table = toml::Table::new();

    if let Some(wheel) = &config.wheel {
        table.insert("wheel".into(), to_forward_slashes(wheel).into());
    }
    if !config.add_wheels.is_empty() {
        let deps = config.add_wheels.iter().map(Dependency::to_toml).collect();
        table.insert("add_wheels".into(), toml::Value::Array(deps));
    }
    if let Some(entrypoint) = &config.entrypoint {
        table.insert("entrypoint".into(), entrypoint.clone().into());
    }
    if !config.entrypoint_args.is_empty() {
        table.insert("entrypoint_args".into(), string_array(&config.entrypoint_args));
    }
    if !config.includes.is_empty() {
        let includes: Vec<String> = config.includes.iter().map(ToString::to_string).collect();
        table.insert("includes".into(), string_array(&includes));
    }
    if !config.metadata.is_empty() {
        let entries = config
            .metadata
            .iter()
            .map(|m| {
                let mut entry = toml::Table::new();
                entry.insert("key".into(), m.key.clone().into());
                entry.insert("value".into(), m.value.clone().into());
                toml::Value::Table(entry)
            })
            .collect();
        table.insert("metadata".into(), toml::Value::Array(entries));
    }
    if let Some(chub) = &config.chub {
        table.insert("chub".into(), to_forward_slashes(chub).into());
    }
    let mut scripts = toml::Table::new();
    for (kind, paths) in [("pre", &config.pre_scripts), ("post", &config.post_scripts)] {
        if !paths.is_empty() {
            let paths: Vec<String> = paths.iter().map(|p| to_forward_slashes(p)).collect();
            scripts.insert(kind.into(), string_array(&paths));
        }
    }
    if !scripts.is_empty() {
        table.insert("scripts".into(), toml::Value::Table(scripts));
    }

    table
}

fn string_array(items: &[String]) -> toml::Value {
    toml::Value::Array(items.iter().cloned().map(toml::Value::String).collect())
}

/// Typed accessors that report the file and key on a type mismatch
struct Fields<'a> {
    table: &'a toml::Table,
    path: &'a Path,
}

impl Fields<'_> {
    fn wrong_type(&self, key: &str, expected: &str, got: &toml::Value) -> crate::error::PychubError {
        config::parse_failed(
            self.path.display().to_string(),
            format!("'{}' must be {}, got {}", key, expected, got.type_str()),
        )
    }

    fn string(&self, key: &str) -> Result<Option<String>> {
        match self.table.get(key) {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.wrong_type(key, "a string", other)),
        }
    }

    fn bool(&self, key: &str) -> Result<Option<bool>> {
        match self.table.get(key) {
            None => Ok(None),
            Some(toml::Value::Boolean(b)) => Ok(Some(*b)),
            Some(other) => Err(self.wrong_type(key, "a boolean", other)),
        }
    }

    fn array(&self, key: &str) -> Result<Vec<toml::Value>> {
        match self.table.get(key) {
            None => Ok(Vec::new()),
            Some(toml::Value::Array(items)) => Ok(items.clone()),
            Some(other) => Err(self.wrong_type(key, "an array", other)),
        }
    }

    fn strings(&self, key: &str) -> Result<Vec<String>> {
        self.array(key)?
            .into_iter()
            .map(|item| match item {
                toml::Value::String(s) => Ok(s),
                other => Err(self.wrong_type(key, "an array of strings", &other)),
            })
            .collect()
    }

    /// A single string or an array of strings
    fn one_or_many(&self, key: &str) -> Result<Vec<String>> {
        match self.table.get(key) {
            Some(toml::Value::String(s)) => Ok(vec![s.clone()]),
            Some(toml::Value::Array(_)) | None => self.strings(key),
            Some(other) => Err(self.wrong_type(key, "a string or an array of strings", other)),
        }
    }

    /// Install scripts of one kind (`pre` or `post`)
    ///
    /// `<kind>_script` comes first, then `<kind>_scripts` or, when that key
    /// is absent, `scripts.<kind>`.
    fn scripts(&self, kind: &str) -> Result<Vec<PathBuf>> {
        let mut paths = self.one_or_many(&format!("{}_script", kind))?;

        let listed = format!("{}_scripts", kind);
        if self.table.contains_key(&listed) {
            paths.extend(self.one_or_many(&listed)?);
        } else {
            match self.table.get("scripts") {
                None => {}
                Some(toml::Value::Table(scripts)) => {
                    let nested = Fields {
                        table: scripts,
                        path: self.path,
                    };
                    paths.extend(nested.one_or_many(kind)?);
                }
                Some(other) => return Err(self.wrong_type("scripts", "a table", other)),
            }
        }

        Ok(paths.into_iter().map(PathBuf::from).collect())
    }

    /// Accepts a table (`key = "v"` or `key = ["v1", "v2"]`), an array of
    /// `{ key, value }` tables, or an array of `key=value` strings
    fn metadata(&self) -> Result<Vec<MetadataEntry>> {
        match self.table.get("metadata") {
            None => Ok(Vec::new()),
            Some(toml::Value::Table(table)) => {
                let mut entries = Vec::new();
                for (key, value) in table {
                    match value {
                        toml::Value::Array(items) => {
                            for item in items {
                                entries.push(MetadataEntry::new(key, self.scalar(key, item)?));
                            }
                        }
                        other => entries.push(MetadataEntry::new(key, self.scalar(key, other)?)),
                    }
                }
                Ok(entries)
            }
            Some(toml::Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    toml::Value::String(s) => MetadataEntry::parse(s),
                    toml::Value::Table(entry) => {
                        let nested = Fields {
                            table: entry,
                            path: self.path,
                        };
                        let key = nested
                            .string("key")?
                            .ok_or_else(|| self.wrong_type("metadata", "{ key, value } tables", item))?;
                        let value = nested.string("value")?.unwrap_or_default();
                        if key.trim().is_empty() {
                            return Err(self.wrong_type("metadata", "entries with a non-empty key", item));
                        }
                        Ok(MetadataEntry::new(key, value))
                    }
                    other => Err(self.wrong_type("metadata", "strings or tables", other)),
                })
                .collect(),
            Some(other) => Err(self.wrong_type("metadata", "a table or an array", other)),
        }
    }

    fn scalar(&self, key: &str, value: &toml::Value) -> Result<String> {
        match value {
            toml::Value::String(s) => Ok(s.clone()),
            toml::Value::Integer(_) | toml::Value::Float(_) | toml::Value::Boolean(_) => {
                Ok(value.to_string())
            }
            other => Err(self.wrong_type(key, "a string", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PychubError;

    fn table(text: &str) -> toml::Table {
        toml::from_str(text).unwrap()
    }

    fn parse(text: &str) -> ProjectConfig {
        from_table(&table(text), Path::new("chubproject.toml"))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_all_fields() {
        let config = parse(
            r#"
wheel = "dist/app-1.0-py3-none-any.whl"
add_wheels = ["requests>=2", { path = "../libfoo", version = "1.2.0" }]
entrypoint = "app.cli:main"
entrypoint_args = ["--verbose"]
includes = ["README.md", "conf/app.ini::etc/app.ini"]
pre_script = "scripts/pre.sh"
post_script = "scripts/post.sh"
chub = "out/app.chub"

[metadata]
team = "platform"
tags = ["a", "b"]
build = 7
"#,
        );

        assert_eq!(config.wheel, Some(PathBuf::from("dist/app-1.0-py3-none-any.whl")));
        assert_eq!(config.add_wheels.len(), 2);
        assert!(config.add_wheels[1].is_path());
        assert_eq!(config.entrypoint.as_deref(), Some("app.cli:main"));
        assert_eq!(config.entrypoint_args, vec!["--verbose"]);
        assert_eq!(config.includes[1].dest_name(), "etc/app.ini");
        assert_eq!(
            config.metadata,
            vec![
                MetadataEntry::new("team", "platform"),
                MetadataEntry::new("tags", "a"),
                MetadataEntry::new("tags", "b"),
                MetadataEntry::new("build", "7"),
            ]
        );
        assert_eq!(config.pre_scripts, vec![PathBuf::from("scripts/pre.sh")]);
        assert_eq!(config.post_scripts, vec![PathBuf::from("scripts/post.sh")]);
        assert_eq!(config.chub, Some(PathBuf::from("out/app.chub")));
    }

    #[test]
    fn test_metadata_array_forms() {
        let config = parse(
            r#"
metadata = ["k=v1", { key = "k", value = "v2" }]
"#,
        );
        assert_eq!(
            config.metadata,
            vec![MetadataEntry::new("k", "v1"), MetadataEntry::new("k", "v2")]
        );
    }

    #[test]
    fn test_scripts_table_accepts_string_or_array() {
        let config = parse("[scripts]\npre = [\"venv.sh\", \"pre.sh\"]\npost = \"post.sh\"\n");
        assert_eq!(
            config.pre_scripts,
            vec![PathBuf::from("venv.sh"), PathBuf::from("pre.sh")]
        );
        assert_eq!(config.post_scripts, vec![PathBuf::from("post.sh")]);
    }

    #[test]
    fn test_script_key_forms_combine() {
        let config = parse(
            r#"
pre_script = "first.sh"
pre_scripts = ["second.sh", "third.sh"]
post_scripts = "done.sh"

[scripts]
pre = ["shadowed.sh"]
post = ["also.sh"]
"#,
        );
        assert_eq!(
            config.pre_scripts,
            vec![
                PathBuf::from("first.sh"),
                PathBuf::from("second.sh"),
                PathBuf::from("third.sh"),
            ]
        );
        assert_eq!(config.post_scripts, vec![PathBuf::from("done.sh")]);
    }

    #[test]
    fn test_enabled_false() {
        let result = from_table(&table("enabled = false\nwheel = \"x.whl\"\n"), Path::new("p"));
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn test_wrong_types() {
        for text in [
            "wheel = 3",
            "includes = \"README.md\"",
            "entrypoint_args = [1, 2]",
            "enabled = \"no\"",
            "metadata = 5",
            "pre_scripts = 1",
            "scripts = \"pre.sh\"",
            "[scripts]\npost = [true]",
        ] {
            let err = from_table(&table(text), Path::new("chubproject.toml")).unwrap_err();
            assert!(
                matches!(err, PychubError::ConfigParseFailed { .. }),
                "{} gave {}",
                text,
                err
            );
        }
    }

    #[test]
    fn test_to_table_round_trip() {
        let config = parse(
            r#"
wheel = "dist/app-1.0-py3-none-any.whl"
add_wheels = ["requests>=2", "../libfoo"]
entrypoint = "app"
includes = ["README.md::docs/README.md"]
metadata = ["k=v1", "k=v2"]
post_scripts = ["post.sh", "cleanup/post.sh"]
"#,
        );
        let rendered = to_table(&config);
        assert!(!rendered.contains_key("entrypoint_args"));
        let scripts = rendered["scripts"].as_table().unwrap();
        assert!(!scripts.contains_key("pre"));
        assert_eq!(scripts["post"].as_array().unwrap().len(), 2);

        let reparsed = from_table(&rendered, Path::new("chubproject.toml"))
            .unwrap()
            .unwrap();
        assert_eq!(reparsed, config);
    }
}
