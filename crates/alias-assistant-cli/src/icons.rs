use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, bail, Context, Result};

pub const SOURCE_LOGO: &str = "logo.png";
pub const ICONS_DIR: &str = "src-tauri/icons";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconEntry {
    pub name: &'static str,
    pub size: u32,
}

const fn entry(name: &'static str, size: u32) -> IconEntry {
    IconEntry { name, size }
}

pub const ICON_MANIFEST: &[IconEntry] = &[
    entry("32x32.png", 32),
    entry("128x128.png", 128),
    entry("128x128@2x.png", 256),
    entry("icon.png", 512),
    entry("Square30x30Logo.png", 30),
    entry("Square44x44Logo.png", 44),
    entry("Square71x71Logo.png", 71),
    entry("Square89x89Logo.png", 89),
    entry("Square107x107Logo.png", 107),
    entry("Square142x142Logo.png", 142),
    entry("Square150x150Logo.png", 150),
    entry("Square284x284Logo.png", 284),
    entry("Square310x310Logo.png", 310),
    entry("StoreLogo.png", 1024),
];

/// Renders square PNGs from the source logo.
pub trait ImageBackend {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool;

    /// Scales `source` to fit `size`x`size`, centered on a transparent
    /// canvas, and writes it to `output` as PNG.
    fn render(&self, source: &Path, size: u32, output: &Path) -> Result<()>;
}

/// In-process rendering with the `image` crate.
pub struct Native;

impl ImageBackend for Native {
    fn name(&self) -> &'static str {
        "image"
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "native-image")
    }

    #[cfg(feature = "native-image")]
    fn render(&self, source: &Path, size: u32, output: &Path) -> Result<()> {
        use image::{imageops, imageops::FilterType, ImageFormat, RgbaImage};

        let logo = image::open(source)
            .with_context(|| format!("error opening {}", source.display()))?;
        let resized = logo.resize(size, size, FilterType::Lanczos3).to_rgba8();

        let mut canvas = RgbaImage::new(size, size);
        let x = (size - resized.width()) / 2;
        let y = (size - resized.height()) / 2;
        imageops::overlay(&mut canvas, &resized, x as i64, y as i64);

        canvas.save_with_format(output, ImageFormat::Png)?;

        Ok(())
    }

    #[cfg(not(feature = "native-image"))]
    fn render(&self, _source: &Path, _size: u32, _output: &Path) -> Result<()> {
        bail!("built without the native-image feature")
    }
}

/// ImageMagick's `convert`.
pub struct ImageMagick;

impl ImageBackend for ImageMagick {
    fn name(&self) -> &'static str {
        "ImageMagick"
    }

    fn is_available(&self) -> bool {
        which::which("convert").is_ok()
    }

    fn render(&self, source: &Path, size: u32, output: &Path) -> Result<()> {
        let geometry = format!("{}x{}", size, size);
        let mut command = Command::new("convert");
        command
            .arg(source)
            .args(["-resize", &geometry])
            .args(["-background", "none", "-gravity", "center"])
            .args(["-extent", &geometry])
            .arg(output);

        run(&mut command)
    }
}

/// Backends in order of preference.
pub const BACKENDS: &[&dyn ImageBackend] = &[&Native, &ImageMagick];

pub fn select_backend<'a>(backends: &[&'a dyn ImageBackend]) -> Option<&'a dyn ImageBackend> {
    backends.iter().copied().find(|backend| backend.is_available())
}

/// A multi-resolution icon file assembled by an external tool from a
/// scratch directory of PNGs.
pub struct Bundle {
    pub output: &'static str,
    pub scratch_dir: &'static str,
    pub tool: &'static str,
    pub entries: fn() -> Vec<(String, u32)>,
    pub args: fn(scratch: &Path, pngs: &[PathBuf], output: &Path) -> Vec<OsString>,
}

pub const ICNS: Bundle = Bundle {
    output: "icon.icns",
    scratch_dir: "icon.iconset",
    tool: "iconutil",
    entries: iconset_entries,
    args: iconutil_args,
};

pub const ICO: Bundle = Bundle {
    output: "icon.ico",
    scratch_dir: "icon.icoset",
    tool: "convert",
    entries: ico_entries,
    args: convert_ico_args,
};

fn iconset_entries() -> Vec<(String, u32)> {
    [16, 32, 64, 128, 256, 512, 1024]
        .into_iter()
        .flat_map(|size| {
            [
                (format!("icon_{size}x{size}.png"), size),
                (format!("icon_{size}x{size}@2x.png"), size * 2),
            ]
        })
        .collect()
}

fn iconutil_args(scratch: &Path, _pngs: &[PathBuf], output: &Path) -> Vec<OsString> {
    vec![
        "-c".into(),
        "icns".into(),
        scratch.into(),
        "-o".into(),
        output.into(),
    ]
}

fn ico_entries() -> Vec<(String, u32)> {
    [256, 128, 64, 48, 32, 16]
        .into_iter()
        .map(|size| (format!("icon_{size}.png"), size))
        .collect()
}

fn convert_ico_args(_scratch: &Path, pngs: &[PathBuf], output: &Path) -> Vec<OsString> {
    pngs.iter()
        .map(OsString::from)
        .chain(std::iter::once(output.into()))
        .collect()
}

fn run(command: &mut Command) -> Result<()> {
    let output = command
        .output()
        .with_context(|| format!("error running {:?}", command.get_program()))?;

    if !output.status.success() {
        bail!(
            "{:?} exited with {}: {}",
            command.get_program(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(())
}

/// Renders every manifest entry, logging and skipping failures. Returns the
/// number of files written.
pub fn generate_pngs(
    backend: &dyn ImageBackend,
    source: &Path,
    icons_dir: &Path,
    manifest: &[IconEntry],
) -> usize {
    let mut generated = 0;
    for IconEntry { name, size } in manifest {
        match backend.render(source, *size, &icons_dir.join(name)) {
            Ok(()) => {
                info!("  ✓ {} ({}x{})", name, size, size);
                generated += 1;
            }
            Err(e) => error!("  error generating {}: {:#}", name, e),
        }
    }

    generated
}

/// Builds `bundle` into `icons_dir`. Returns `Ok(false)` when the bundler
/// tool is not installed.
pub fn generate_bundle(
    bundle: &Bundle,
    backend: &dyn ImageBackend,
    source: &Path,
    icons_dir: &Path,
) -> Result<bool> {
    if which::which(bundle.tool).is_err() {
        warn!("  skipping {}: {} is not installed", bundle.output, bundle.tool);
        return Ok(false);
    }

    let scratch = icons_dir.join(bundle.scratch_dir);
    if scratch.exists() {
        fs::remove_dir_all(&scratch)?;
    }
    fs::create_dir_all(&scratch)?;

    let mut pngs = vec![];
    for (name, size) in (bundle.entries)() {
        let png = scratch.join(name);
        backend.render(source, size, &png)?;
        pngs.push(png);
    }

    let output = icons_dir.join(bundle.output);
    run(Command::new(bundle.tool).args((bundle.args)(&scratch, &pngs, &output)))?;

    fs::remove_dir_all(&scratch)
        .with_context(|| format!("error removing {}", scratch.display()))?;

    Ok(true)
}

pub fn generate_icons(root: &Path) -> Result<()> {
    let source = root.join(SOURCE_LOGO);
    if !source.exists() {
        bail!(
            "source logo {} does not exist, place {} in the project root",
            source.display(),
            SOURCE_LOGO
        );
    }

    let backend = select_backend(BACKENDS).ok_or_else(|| {
        anyhow!(
            "no image processing backend found: build with `--features native-image` \
             or install ImageMagick (e.g. `brew install imagemagick`)"
        )
    })?;
    info!("processing images with {}", backend.name());
    info!("source {}", source.display());

    let icons_dir = root.join(ICONS_DIR);
    fs::create_dir_all(&icons_dir)
        .with_context(|| format!("error creating {}", icons_dir.display()))?;

    info!("generating PNG files...");
    let generated = generate_pngs(backend, &source, &icons_dir, ICON_MANIFEST);
    info!("generated {}/{} PNG files", generated, ICON_MANIFEST.len());

    for bundle in [&ICNS, &ICO] {
        info!("generating {}...", bundle.output);
        match generate_bundle(bundle, backend, &source, &icons_dir) {
            Ok(true) => info!("  ✓ {}", bundle.output),
            Ok(false) => {}
            Err(e) => error!("  error generating {}: {:#}", bundle.output, e),
        }
    }

    info!("icon generation finished");

    Ok(())
}
