use crate::buffer::pixel_buffer::PixelBuffer;
use crate::foundation::error::{BlitError, BlitResult, HandleFault};
use crate::output::handle::RenderOutputHandle;
use crate::output::sink::PresentationSink;

/// Registry configuration.
#[derive(Debug, Clone, Copy)]
pub struct RegistryOpts {
    /// Maximum number of simultaneously live outputs.
    pub max_live_outputs: usize,
}

impl Default for RegistryOpts {
    fn default() -> Self {
        Self {
            max_live_outputs: 64,
        }
    }
}

#[derive(Debug)]
struct LiveOutput {
    name: String,
    frames_submitted: u64,
}

#[derive(Debug)]
struct Slot {
    /// Generation of the current or most recent occupant.
    generation: u32,
    live: Option<LiveOutput>,
}

/// Authoritative table of live render outputs.
///
/// Outputs move `Live -> Destroyed`; destroyed slots are recycled with a bumped generation, so a
/// stale handle is always detected. Every handle is validated here before the sink is called.
#[derive(Debug)]
pub struct OutputRegistry<S: PresentationSink> {
    opts: RegistryOpts,
    sink: S,
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl<S: PresentationSink> OutputRegistry<S> {
    /// Create a registry with default options.
    pub fn new(sink: S) -> Self {
        Self::with_opts(sink, RegistryOpts::default())
    }

    /// Create a registry with explicit options.
    pub fn with_opts(sink: S, opts: RegistryOpts) -> Self {
        Self {
            opts,
            sink,
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Mint a live handle bound to `name`. Names need not be unique.
    #[tracing::instrument(skip(self))]
    pub fn create_output(&mut self, name: &str) -> BlitResult<RenderOutputHandle> {
        if self.live >= self.opts.max_live_outputs {
            return Err(BlitError::validation(format!(
                "live output limit reached ({})",
                self.opts.max_live_outputs
            )));
        }

        let (slot, generation) = match self.free.pop() {
            Some(slot) => (slot, self.slots[slot as usize].generation + 1),
            None => {
                let slot = u32::try_from(self.slots.len())
                    .ok()
                    .filter(|s| *s != u32::MAX)
                    .ok_or_else(|| BlitError::validation("output slot space exhausted"))?;
                self.slots.push(Slot {
                    generation: 0,
                    live: None,
                });
                (slot, 1)
            }
        };
        let handle = RenderOutputHandle::new(slot, generation);

        if let Err(err) = self.sink.create_output(handle, name) {
            // The slot was never handed out; put it back untouched.
            if generation > 1 {
                self.free.push(slot);
            } else {
                self.slots.pop();
            }
            return Err(err);
        }

        let entry = &mut self.slots[slot as usize];
        entry.generation = generation;
        entry.live = Some(LiveOutput {
            name: name.to_owned(),
            frames_submitted: 0,
        });
        self.live += 1;
        tracing::debug!(%handle, "output created");
        Ok(handle)
    }

    /// Destroy a live output.
    ///
    /// The registry entry is released even if the sink reports an error; that error is returned
    /// afterwards.
    #[tracing::instrument(skip(self))]
    pub fn destroy_output(&mut self, handle: RenderOutputHandle) -> BlitResult<()> {
        self.check_live(handle)?;

        let slot = handle.slot();
        self.slots[slot as usize].live = None;
        self.live -= 1;
        // Retire the slot once its generation is exhausted rather than risk aliasing.
        if handle.generation() < u32::MAX {
            self.free.push(slot);
        }
        tracing::debug!(%handle, "output destroyed");

        self.sink.destroy_output(handle)
    }

    /// Ask the sink to clear stale content for a live output. Identity is unchanged.
    #[tracing::instrument(skip(self))]
    pub fn reset_output(&mut self, handle: RenderOutputHandle) -> BlitResult<()> {
        self.check_live(handle)?;
        self.sink.reset_output(handle)
    }

    /// Hand a completed frame to the sink for a live output.
    pub fn submit_frame(
        &mut self,
        handle: RenderOutputHandle,
        frame: &PixelBuffer,
    ) -> BlitResult<()> {
        self.check_live(handle)?;
        self.sink.present(handle, frame)?;
        if let Some(live) = self.slots[handle.slot() as usize].live.as_mut() {
            live.frames_submitted += 1;
        }
        Ok(())
    }

    /// Destroy every live output, returning the first sink error encountered.
    pub fn destroy_all(&mut self) -> BlitResult<()> {
        let mut first_err = None;
        for handle in self.live_handles() {
            if let Err(err) = self.destroy_output(handle) {
                tracing::warn!(%handle, error = %err, "destroy during shutdown failed");
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Return `true` if `handle` is currently live.
    pub fn is_live(&self, handle: RenderOutputHandle) -> bool {
        self.check_live(handle).is_ok()
    }

    /// Name the output was registered with.
    pub fn name(&self, handle: RenderOutputHandle) -> BlitResult<&str> {
        self.check_live(handle)?;
        Ok(self.live_entry(handle).map_or("", |l| l.name.as_str()))
    }

    /// Number of frames accepted for `handle` since it was created.
    pub fn frames_submitted(&self, handle: RenderOutputHandle) -> BlitResult<u64> {
        self.check_live(handle)?;
        Ok(self.live_entry(handle).map_or(0, |l| l.frames_submitted))
    }

    /// Number of live outputs.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Live handles in slot order.
    pub fn live_handles(&self) -> Vec<RenderOutputHandle> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.live.is_some())
            .map(|(i, s)| RenderOutputHandle::new(i as u32, s.generation))
            .collect()
    }

    /// Borrow the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutably borrow the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the registry and return the sink. Live outputs are not destroyed.
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn live_entry(&self, handle: RenderOutputHandle) -> Option<&LiveOutput> {
        self.slots
            .get(handle.slot() as usize)
            .and_then(|s| s.live.as_ref())
    }

    fn check_live(&self, handle: RenderOutputHandle) -> BlitResult<()> {
        if handle.is_invalid() {
            return Err(BlitError::invalid_handle(handle, HandleFault::Sentinel));
        }
        let Some(slot) = self.slots.get(handle.slot() as usize) else {
            return Err(BlitError::invalid_handle(handle, HandleFault::NeverIssued));
        };
        let fault = if handle.generation() > slot.generation {
            HandleFault::NeverIssued
        } else if handle.generation() < slot.generation || slot.live.is_none() {
            HandleFault::Destroyed
        } else {
            return Ok(());
        };
        Err(BlitError::invalid_handle(handle, fault))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/registry.rs"]
mod tests;
