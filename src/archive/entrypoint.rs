//! Entrypoint validation against the main wheel
//!
//! An entrypoint is accepted when it is
//! - the name of a console or GUI script declared by the wheel, or
//! - `module:callable` where the module ships in the wheel and binds the
//!   callable's first name at its top level (`def`, `async def`, `class`,
//!   an assignment or an import)
//!
//! Compiled extension modules cannot be inspected; their callables are
//! accepted as long as the module exists.

use crate::error::{Result, archive};
use crate::wheel::contents::{ModuleFile, WheelContents};
use crate::wheel::WheelArtifact;

/// Check `entrypoint` against what the main wheel provides
pub fn validate(entrypoint: &str, main: &WheelArtifact) -> Result<()> {
    let contents = WheelContents::read(&main.path)?;
    let wheel = main.filename();
    let invalid = |reason: String| archive::invalid_entrypoint(entrypoint, wheel.as_str(), reason);

    if contents.console_scripts().contains_key(entrypoint) {
        tracing::debug!(entrypoint, "Entrypoint is a console script");
        return Ok(());
    }

    let Some((module, callable)) = entrypoint.split_once(':') else {
        return Err(invalid(
            "not a console script of the wheel and not in module:callable form".to_string(),
        ));
    };
    let (module, callable) = (module.trim(), callable.trim());

    if !is_dotted_identifier(module) {
        return Err(invalid(format!("'{}' is not a valid module path", module)));
    }
    if !is_dotted_identifier(callable) {
        return Err(invalid(format!("'{}' is not a valid callable name", callable)));
    }

    // `pkg.mod:Class.method` needs `Class` at module level
    let top_level = callable.split('.').next().unwrap_or(callable);

    match contents.find_module(module)? {
        None => Err(invalid(format!("module '{}' is not in the wheel", module))),
        Some(ModuleFile::Extension) => {
            tracing::debug!(module, "Entrypoint module is a compiled extension");
            Ok(())
        }
        Some(ModuleFile::Source(source)) if binds_top_level(&source, top_level) => Ok(()),
        Some(ModuleFile::Source(_)) => Err(invalid(format!(
            "'{}' is not defined at the top level of '{}'",
            top_level, module
        ))),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

fn is_dotted_identifier(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_identifier)
}

/// Whether module source binds `name` without indentation
///
/// Lines inside triple-quoted strings are skipped.
fn binds_top_level(source: &str, name: &str) -> bool {
    let mut lines = source.lines();
    let mut open_string: Option<&str> = None;

    while let Some(line) = lines.next() {
        if let Some(delim) = open_string {
            if line.matches(delim).count() % 2 == 1 {
                open_string = None;
            }
            continue;
        }
        open_string = opens_string(line);

        if line.starts_with(char::is_whitespace) || line.starts_with('#') {
            continue;
        }
        let line = line.trim_end();

        for keyword in ["def ", "async def ", "class "] {
            if let Some(rest) = line.strip_prefix(keyword) {
                if leading_identifier(rest.trim_start()) == Some(name) {
                    return true;
                }
            }
        }

        if let Some(imported) = line.strip_prefix("from ").and_then(|l| l.split_once(" import ")) {
            let mut names = imported.1.trim().to_string();
            if names.starts_with('(') && !names.contains(')') {
                for next in lines.by_ref() {
                    names.push(' ');
                    names.push_str(next.trim());
                    if next.contains(')') {
                        break;
                    }
                }
            }
            if import_binds(names.trim_matches(|c| c == '(' || c == ')' || c == ' '), name) {
                return true;
            }
            continue;
        }

        if let Some(imported) = line.strip_prefix("import ") {
            let bound = imported.split(',').any(|item| {
                let item = item.trim();
                match item.split_once(" as ") {
                    Some((_, alias)) => alias.trim() == name,
                    None => item.split('.').next() == Some(name),
                }
            });
            if bound {
                return true;
            }
            continue;
        }

        if assigns(line, name) {
            return true;
        }
    }

    false
}

/// Triple-quote delimiter left open at the end of `line`
fn opens_string(line: &str) -> Option<&'static str> {
    let first = ["\"\"\"", "'''"]
        .into_iter()
        .filter_map(|delim| line.find(delim).map(|at| (at, delim)))
        .min_by_key(|(at, _)| *at)?
        .1;
    (line.matches(first).count() % 2 == 1).then_some(first)
}

/// `a, b as c` binds `a` and `c`
fn import_binds(names: &str, name: &str) -> bool {
    names.split(',').any(|item| {
        let item = item.trim();
        match item.split_once(" as ") {
            Some((_, alias)) => alias.trim() == name,
            None => item == name,
        }
    })
}

/// `name = ...` or `name: T = ...`
fn assigns(line: &str, name: &str) -> bool {
    let Some(rest) = line.strip_prefix(name) else {
        return false;
    };
    let rest = rest.trim_start();
    if let Some(after) = rest.strip_prefix('=') {
        return !after.starts_with('=');
    }
    if let Some(annotation) = rest.strip_prefix(':') {
        return annotation.contains('=');
    }
    false
}

fn leading_identifier(s: &str) -> Option<&str> {
    let end = s
        .find(|c: char| !(c == '_' || c.is_alphanumeric()))
        .unwrap_or(s.len());
    (end > 0).then(|| &s[..end])
}
