use crate::foundation::core::{Color, Rect};
use crate::model::stream::Stream;
use crate::model::surface::Surface;

/// Alpha written to the destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AlphaMode {
    /// Output alpha is forced to fully opaque.
    #[default]
    Opaque,
    /// Output alpha comes from the background color.
    BgColor,
}

/// Static HDR metadata of the content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HdrMetadata {
    /// Minimum mastering luminance, in 0.0001 nit units.
    pub min_mastering: u32,
    /// Maximum mastering luminance, in nits.
    pub max_mastering: u32,
    /// Maximum content light level, in nits.
    pub max_content: u32,
    /// Maximum frame-average light level, in nits.
    pub avg_content: u32,
}

/// Lock-step processing across several engine instances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Collaboration {
    /// Number of cooperating instances.
    pub num_instances: u32,
}

/// A complete processing job: inputs, destination and output settings.
///
/// `check_support` validates a job and `build_commands` must then be called with an identical
/// one. Equality is bit-exact, floats included.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BuildParam {
    /// Input streams in blend order.
    pub streams: Vec<Stream>,
    /// Destination surface.
    pub dst_surface: Surface,
    /// Region of the destination that is written.
    pub target_rect: Rect,
    /// Fill color for regions no stream covers.
    #[serde(default)]
    pub bg_color: Color,
    /// Output alpha policy.
    #[serde(default)]
    pub alpha_mode: AlphaMode,
    /// Content light levels used by tone mapping.
    #[serde(default)]
    pub hdr_metadata: Option<HdrMetadata>,
    /// Collaboration mode.
    #[serde(default)]
    pub collaboration: Option<Collaboration>,
}

impl BuildParam {
    /// Job writing `streams` into `target_rect` of `dst_surface` over a black background.
    pub fn new(streams: Vec<Stream>, dst_surface: Surface, target_rect: Rect) -> Self {
        Self {
            streams,
            dst_surface,
            target_rect,
            bg_color: Color::new(0.0, 0.0, 0.0, 1.0),
            alpha_mode: AlphaMode::Opaque,
            hdr_metadata: None,
            collaboration: None,
        }
    }

    /// Collaboration instance count, 1 when collaboration is off.
    pub fn collab_instances(&self) -> u32 {
        self.collaboration.map_or(1, |c| c.num_instances.max(1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/job.rs"]
mod tests;
