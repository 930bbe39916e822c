use strata_world::World;

use crate::{DensityVolume, GridRegion, generate_volume, smooth_region};

/// Raw edit target plus its smoothed view. Without smoothing the processed view is the raw map.
#[derive(Clone, Debug)]
pub struct DensityMaps {
    raw: DensityVolume,
    processed: Option<DensityVolume>,
    blur_radius: i32,
}

impl DensityMaps {
    /// Generates the raw map and, when `blur` is set, a fully smoothed copy.
    pub fn generate(world: &World, blur: Option<i32>) -> Self {
        Self::from_raw(generate_volume(world), blur)
    }

    pub fn from_raw(raw: DensityVolume, blur: Option<i32>) -> Self {
        let processed = blur.map(|r| {
            let mut out = DensityVolume::new(raw.size());
            smooth_region(&raw, &mut out, GridRegion::full(raw.size()), r);
            out
        });
        Self {
            raw,
            processed,
            blur_radius: blur.unwrap_or(0),
        }
    }

    #[inline]
    pub fn raw(&self) -> &DensityVolume {
        &self.raw
    }

    #[inline]
    pub fn raw_mut(&mut self) -> &mut DensityVolume {
        &mut self.raw
    }

    #[inline]
    pub fn processed(&self) -> &DensityVolume {
        self.processed.as_ref().unwrap_or(&self.raw)
    }

    #[inline]
    pub fn is_smoothed(&self) -> bool {
        self.processed.is_some()
    }

    #[inline]
    pub fn blur_radius(&self) -> i32 {
        self.blur_radius
    }

    /// Re-smooths `region` of the processed map from the raw map.
    pub fn reprocess(&mut self, region: GridRegion) {
        if let Some(out) = self.processed.as_mut() {
            smooth_region(&self.raw, out, region, self.blur_radius);
        }
    }
}
