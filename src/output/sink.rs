use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::buffer::pixel_buffer::PixelBuffer;
use crate::foundation::error::{BlitError, BlitResult};
use crate::output::handle::RenderOutputHandle;

/// Consumer of completed frames, keyed by output handle.
///
/// The [`OutputRegistry`](crate::OutputRegistry) validates handles before calling any method, so
/// implementations only ever see handles that are live at the time of the call.
pub trait PresentationSink {
    /// A new output named `name` became live.
    fn create_output(&mut self, handle: RenderOutputHandle, name: &str) -> BlitResult<()>;
    /// The output was destroyed; release any state held for it.
    fn destroy_output(&mut self, handle: RenderOutputHandle) -> BlitResult<()>;
    /// Clear any stale content for the output while keeping it registered.
    fn reset_output(&mut self, handle: RenderOutputHandle) -> BlitResult<()>;
    /// Display or record a completed frame.
    fn present(&mut self, handle: RenderOutputHandle, frame: &PixelBuffer) -> BlitResult<()>;
}

impl<S: PresentationSink + ?Sized> PresentationSink for Box<S> {
    fn create_output(&mut self, handle: RenderOutputHandle, name: &str) -> BlitResult<()> {
        (**self).create_output(handle, name)
    }

    fn destroy_output(&mut self, handle: RenderOutputHandle) -> BlitResult<()> {
        (**self).destroy_output(handle)
    }

    fn reset_output(&mut self, handle: RenderOutputHandle) -> BlitResult<()> {
        (**self).reset_output(handle)
    }

    fn present(&mut self, handle: RenderOutputHandle, frame: &PixelBuffer) -> BlitResult<()> {
        (**self).present(handle, frame)
    }
}

/// One call observed by an [`InMemorySink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkEvent {
    /// `create_output(handle, name)`.
    Created(RenderOutputHandle, String),
    /// `destroy_output(handle)`.
    Destroyed(RenderOutputHandle),
    /// `reset_output(handle)`.
    Reset(RenderOutputHandle),
    /// `present(handle, frame)`; the frame itself is kept in [`InMemorySink::latest`].
    Presented(RenderOutputHandle),
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    events: Vec<SinkEvent>,
    latest: HashMap<RenderOutputHandle, PixelBuffer>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received, in order.
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Most recently presented frame for `handle`, if it has not been reset or destroyed since.
    pub fn latest(&self, handle: RenderOutputHandle) -> Option<&PixelBuffer> {
        self.latest.get(&handle)
    }
}

impl PresentationSink for InMemorySink {
    fn create_output(&mut self, handle: RenderOutputHandle, name: &str) -> BlitResult<()> {
        self.events.push(SinkEvent::Created(handle, name.to_owned()));
        Ok(())
    }

    fn destroy_output(&mut self, handle: RenderOutputHandle) -> BlitResult<()> {
        self.latest.remove(&handle);
        self.events.push(SinkEvent::Destroyed(handle));
        Ok(())
    }

    fn reset_output(&mut self, handle: RenderOutputHandle) -> BlitResult<()> {
        self.latest.remove(&handle);
        self.events.push(SinkEvent::Reset(handle));
        Ok(())
    }

    fn present(&mut self, handle: RenderOutputHandle, frame: &PixelBuffer) -> BlitResult<()> {
        self.latest.insert(handle, frame.clone());
        self.events.push(SinkEvent::Presented(handle));
        Ok(())
    }
}

/// Options for [`PngSink`].
#[derive(Clone, Debug)]
pub struct PngSinkOpts {
    /// Directory receiving `<name>-<seq>.png` files. Created on first use.
    pub out_dir: PathBuf,
}

impl PngSinkOpts {
    /// Write frames into `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

#[derive(Debug)]
struct PngTarget {
    stem: String,
    next_seq: u32,
}

/// Sink that records every presented frame as a PNG file.
///
/// Files are named `<sanitized-name>-<seq:05>.png`; outputs sharing a name get the handle slot
/// appended to keep their files apart. Resetting an output restarts its sequence at zero.
#[derive(Debug)]
pub struct PngSink {
    opts: PngSinkOpts,
    targets: HashMap<RenderOutputHandle, PngTarget>,
    written: Vec<PathBuf>,
}

impl PngSink {
    /// Create a sink writing into `opts.out_dir`.
    pub fn new(opts: PngSinkOpts) -> Self {
        Self {
            opts,
            targets: HashMap::new(),
            written: Vec::new(),
        }
    }

    /// Paths of every file written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn target_mut(&mut self, handle: RenderOutputHandle) -> BlitResult<&mut PngTarget> {
        self.targets
            .get_mut(&handle)
            .ok_or_else(|| BlitError::sink(format!("png sink has no target for {handle}")))
    }
}

impl PresentationSink for PngSink {
    fn create_output(&mut self, handle: RenderOutputHandle, name: &str) -> BlitResult<()> {
        let mut stem = sanitize_file_stem(name);
        if self.targets.values().any(|t| t.stem == stem) {
            stem = format!("{stem}-{}", handle.slot());
        }
        self.targets.insert(handle, PngTarget { stem, next_seq: 0 });
        Ok(())
    }

    fn destroy_output(&mut self, handle: RenderOutputHandle) -> BlitResult<()> {
        self.targets.remove(&handle);
        Ok(())
    }

    fn reset_output(&mut self, handle: RenderOutputHandle) -> BlitResult<()> {
        self.target_mut(handle)?.next_seq = 0;
        Ok(())
    }

    fn present(&mut self, handle: RenderOutputHandle, frame: &PixelBuffer) -> BlitResult<()> {
        if frame.is_empty() {
            return Err(BlitError::sink("cannot write an empty frame as png"));
        }
        let out_dir = self.opts.out_dir.clone();
        let target = self.target_mut(handle)?;
        let path = out_dir.join(format!("{}-{:05}.png", target.stem, target.next_seq));
        write_png(&path, frame)?;
        target.next_seq = target.next_seq.saturating_add(1);

        tracing::debug!(%handle, path = %path.display(), "wrote frame");
        self.written.push(path);
        Ok(())
    }
}

/// Write a frame as an RGBA8 PNG, creating parent directories as needed.
pub fn write_png(path: &Path, frame: &PixelBuffer) -> BlitResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_rgba8(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "output".to_owned()
    } else {
        stem
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/sink.rs"]
mod tests;
