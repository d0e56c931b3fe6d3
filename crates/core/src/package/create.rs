use std::{
    collections::HashMap,
    fs::{create_dir_all, remove_dir_all, write},
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use fib_font_engine::{FontEngine, FontHandle, OutputFormat};
use log::{info, warn};

use super::{FONTLOG_FILE, PACKAGE_EXTENSION, README_FILE, README_PLACEHOLDER};
use crate::{
    FibError,
    convert::{Converter, output_path},
    package::metadata::{PackageMetadata, ResourceRecord},
    prompt::Prompt,
    resolver::{Attribute, Resolution, open_all, resolve},
};

/// Options for [`create_package`].
#[derive(Debug, Clone)]
pub struct PackageOptions {
    /// Use this family name instead of resolving it from the fonts.
    pub family_name: Option<String>,
    /// Format of the converted resources.
    pub format: OutputFormat,
    /// Directory in which `<family>.fontpkg` is created.
    pub parent_dir: PathBuf,
    /// Print what would be packaged without touching the filesystem.
    pub dry_run: bool,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self {
            family_name: None,
            format: OutputFormat::Ufo,
            parent_dir: PathBuf::from("."),
            dry_run: false,
        }
    }
}

/// `<parent>/<family>.fontpkg`
pub fn package_dir(parent: &Path, family_name: &str) -> PathBuf {
    parent.join(format!("{family_name}.{PACKAGE_EXTENSION}"))
}

/// Name-table backed package fields, in the order they are resolved.
const NAME_TABLE_FIELDS: [&str; 7] = [
    "Designer",
    "Designer URL",
    "Manufacturer",
    "Vendor URL",
    "Trademark",
    "License",
    "License URL",
];

/// Build a font package from `files` and return its directory.
///
/// A non-interactive `prompt` overwrites an existing package without asking
/// and settles conflicting attributes on the first font's value.
pub fn create_package(
    engine: &dyn FontEngine,
    converter: &Converter<'_>,
    prompt: &mut dyn Prompt,
    files: &[PathBuf],
    options: &PackageOptions,
) -> Result<PathBuf> {
    if files.is_empty() {
        bail!("no font files given");
    }
    let fonts = open_all(engine, files)?;

    let family_name = match &options.family_name {
        Some(name) => name.clone(),
        None => {
            let resolved = resolve_field(&Attribute::FamilyName, &fonts, prompt)?.unwrap_or_default();
            if prompt.interactive() {
                prompt.text("Family name", &resolved)?
            } else {
                resolved
            }
        }
    };
    if family_name.trim().is_empty() {
        bail!("could not determine a family name; pass one explicitly");
    }
    check_family_name(&family_name)?;

    let mut metadata = PackageMetadata {
        family_name: Some(family_name.clone()),
        copyright: resolve_field(&Attribute::Copyright, &fonts, prompt)?,
        ..PackageMetadata::default()
    };
    let [designer, designer_url, manufacturer, vendor_url, trademark, license, license_url] =
        NAME_TABLE_FIELDS;
    metadata.designer = resolve_field(&Attribute::name_table(designer), &fonts, prompt)?;
    metadata.designer_url = resolve_field(&Attribute::name_table(designer_url), &fonts, prompt)?;
    metadata.manufacturer = resolve_field(&Attribute::name_table(manufacturer), &fonts, prompt)?;
    metadata.vendor_url = resolve_field(&Attribute::name_table(vendor_url), &fonts, prompt)?;
    metadata.trademark = resolve_field(&Attribute::name_table(trademark), &fonts, prompt)?;
    metadata.license = resolve_field(&Attribute::name_table(license), &fonts, prompt)?;
    metadata.license_url = resolve_field(&Attribute::name_table(license_url), &fonts, prompt)?;

    let dir = package_dir(&options.parent_dir, &family_name);
    check_resource_names(&fonts, options.format, &dir)?;
    check_inputs_outside(&dir, files)?;
    metadata.resources = fonts.iter().map(|font| ResourceRecord::from_info(font.info())).collect();

    if options.dry_run {
        println!("Would create font package {}", dir.display());
        for font in &fonts {
            let output = output_path(font.path(), options.format, Some(&dir));
            println!("  {} -> {}", font.path().display(), output.display());
        }
        print!("{}", metadata.to_json()?);
        return Ok(dir);
    }

    prepare_dir(&dir, prompt)?;

    for font in &fonts {
        converter.convert(font.as_ref(), options.format, Some(&dir))?;
    }

    metadata.write(&dir)?;

    // Only the last font's FONTLOG and comment are packaged.
    if let Some(last) = fonts.last() {
        write_text_files(&dir, last.as_ref())?;
    }

    println!("Created font package {}", dir.display());
    Ok(dir)
}

fn resolve_field(
    attribute: &Attribute,
    fonts: &[Box<dyn FontHandle>],
    prompt: &mut dyn Prompt,
) -> Result<Option<String>> {
    let resolution = resolve(attribute, fonts, prompt)?;
    if let Resolution::Conflicting(values) = &resolution {
        warn!("Fonts disagree on the {attribute} ({} values), using the first", values.len());
    }
    Ok(resolution.into_first())
}

/// The family name becomes a directory name, so it must be a single plain
/// path component.
fn check_family_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let plain = matches!((components.next(), components.next()), (Some(Component::Normal(_)), None));
    if !plain || name.contains(['/', '\\']) {
        bail!("family name '{name}' cannot be used as a package directory name");
    }
    Ok(())
}

/// Two inputs with the same stem would overwrite each other's resource.
fn check_resource_names(
    fonts: &[Box<dyn FontHandle>],
    format: OutputFormat,
    dir: &Path,
) -> Result<()> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
    for font in fonts {
        let output = output_path(font.path(), format, Some(dir));
        if let Some(previous) = seen.insert(output.clone(), font.path()) {
            bail!(
                "{} and {} would both be packaged as {}; rename one of them",
                previous.display(),
                font.path().display(),
                output.display()
            );
        }
    }
    Ok(())
}

/// Replacing the package must not delete the fonts it is built from.
fn check_inputs_outside(dir: &Path, files: &[PathBuf]) -> Result<()> {
    let Ok(dir) = dir.canonicalize() else {
        return Ok(());
    };
    for file in files {
        let file = file.canonicalize().unwrap_or_else(|_| file.clone());
        if file.starts_with(&dir) {
            bail!(
                "{} is inside {}, which would be replaced; copy it elsewhere first",
                file.display(),
                dir.display()
            );
        }
    }
    Ok(())
}

/// Start from an empty directory, asking before deleting an existing one.
fn prepare_dir(dir: &Path, prompt: &mut dyn Prompt) -> Result<()> {
    if dir.exists() {
        if prompt.interactive() {
            let message = format!("{} already exists. Delete it and continue?", dir.display());
            if !prompt.confirm(&message)? {
                return Err(FibError::Aborted(format!("{} was left untouched", dir.display())).into());
            }
        }
        info!("Removing existing package {}", dir.display());
        remove_dir_all(dir).with_context(|| format!("Failed to remove {}", dir.display()))?;
    }
    create_dir_all(dir).with_context(|| format!("Failed to create directory: {}", dir.display()))
}

fn write_text_files(dir: &Path, font: &dyn FontHandle) -> Result<()> {
    let info = font.info();

    if let Some(log) = info.change_log.as_deref().filter(|s| !s.is_empty()) {
        let path = dir.join(FONTLOG_FILE);
        write(&path, log).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let readme = info.comment.as_deref().filter(|s| !s.is_empty()).unwrap_or(README_PLACEHOLDER);
    let path = dir.join(README_FILE);
    write(&path, readme).with_context(|| format!("Failed to write {}", path.display()))
}
