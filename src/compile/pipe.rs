use smallvec::SmallVec;

/// Result of asking for a pipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PipeGrant {
    pub pipe: u8,
    /// The stream already held this pipe, so its programmed state is still loaded.
    pub owned: bool,
    /// Stream whose state was displaced to make room.
    pub evicted: Option<u16>,
}

/// Which stream each pipe is currently rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PipeTable {
    owners: SmallVec<[Option<u16>; 2]>,
}

impl PipeTable {
    pub(crate) fn new(num_pipes: u32) -> Self {
        Self {
            owners: std::iter::repeat_n(None, num_pipes.max(1) as usize).collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn owner(&self, pipe: u8) -> Option<u16> {
        self.owners.get(usize::from(pipe)).copied().flatten()
    }

    /// Free every pipe whose stream has no pending work.
    pub(crate) fn reclaim(&mut self, mut pending: impl FnMut(u16) -> bool) {
        for slot in self.owners.iter_mut() {
            if slot.is_some_and(|s| !pending(s)) {
                *slot = None;
            }
        }
    }

    /// The pipe already holding `stream`, else a free pipe, else pipe 0 taken from its owner.
    pub(crate) fn find_owner_or_reuse(&mut self, stream: u16) -> PipeGrant {
        if let Some(p) = self.owners.iter().position(|o| *o == Some(stream)) {
            return PipeGrant {
                pipe: p as u8,
                owned: true,
                evicted: None,
            };
        }
        let (pipe, evicted) = match self.owners.iter().position(Option::is_none) {
            Some(p) => (p, None),
            None => (0, self.owners[0]),
        };
        self.owners[pipe] = Some(stream);
        PipeGrant {
            pipe: pipe as u8,
            owned: false,
            evicted,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/pipe.rs"]
mod tests;
