//! Serializable projection configuration.
//!
//! ```json
//! {"type": "orthographic", "rotate": [-10, -40], "clipAngle": 90, "precision": 0.1}
//! ```
//!
//! Every field is optional; omitted fields fall back to the defaults of the
//! chosen [`ProjectionKind`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{GeoError, ProjError};
use crate::math::EPSILON;
use crate::proj::{
    Equirectangular, Mercator, Orthographic, Projection, RawProjection, Sinusoidal, Stereographic,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    #[default]
    Equirectangular,
    Mercator,
    Orthographic,
    Stereographic,
    Sinusoidal,
}

impl ProjectionKind {
    pub fn raw(self) -> Arc<dyn RawProjection> {
        match self {
            ProjectionKind::Equirectangular => Arc::new(Equirectangular),
            ProjectionKind::Mercator => Arc::new(Mercator),
            ProjectionKind::Orthographic => Arc::new(Orthographic),
            ProjectionKind::Stereographic => Arc::new(Stereographic),
            ProjectionKind::Sinusoidal => Arc::new(Sinusoidal),
        }
    }

    /// Scale at which the conventional world view fits a 960 x 500 canvas.
    pub fn default_scale(self) -> f64 {
        match self {
            ProjectionKind::Equirectangular | ProjectionKind::Sinusoidal => 152.63,
            ProjectionKind::Mercator => 961.0 / std::f64::consts::TAU,
            ProjectionKind::Orthographic => 249.5,
            ProjectionKind::Stereographic => 250.0,
        }
    }

    /// Clip angle in degrees, for projections that are only meaningful on
    /// part of the sphere.
    pub fn default_clip_angle(self) -> Option<f64> {
        match self {
            ProjectionKind::Orthographic => Some(90.0 + EPSILON),
            ProjectionKind::Stereographic => Some(142.0),
            _ => None,
        }
    }

    /// A projection with this kind's default scale and clip angle.
    pub fn projection(self) -> Projection {
        let mut projection = Projection::from_raw(self.raw());
        projection
            .set_scale(self.default_scale())
            .set_clip_angle(self.default_clip_angle());
        projection
    }

    pub fn name(self) -> &'static str {
        match self {
            ProjectionKind::Equirectangular => "equirectangular",
            ProjectionKind::Mercator => "mercator",
            ProjectionKind::Orthographic => "orthographic",
            ProjectionKind::Stereographic => "stereographic",
            ProjectionKind::Sinusoidal => "sinusoidal",
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectionKind {
    type Err = ProjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "equirectangular" | "platecarree" => Ok(ProjectionKind::Equirectangular),
            "mercator" => Ok(ProjectionKind::Mercator),
            "orthographic" => Ok(ProjectionKind::Orthographic),
            "stereographic" => Ok(ProjectionKind::Stereographic),
            "sinusoidal" => Ok(ProjectionKind::Sinusoidal),
            _ => Err(ProjError::UnknownProjection(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ProjectionOptions {
    #[serde(rename = "type")]
    pub kind: ProjectionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    pub reflect_x: bool,
    pub reflect_y: bool,
    /// Degrees; zero selects antimeridian clipping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_extent: Option<[[f64; 2]; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,
}

impl ProjectionOptions {
    pub fn from_json(json: &str) -> Result<Self, GeoError> {
        Ok(serde_json::from_str(json)?)
    }

    fn validate(&self) -> Result<(), ProjError> {
        if let Some(scale) = self.scale {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(ProjError::InvalidParameter(format!(
                    "scale must be positive and finite, got {scale}"
                )));
            }
        }
        if let Some(rotate) = &self.rotate {
            if !(2..=3).contains(&rotate.len()) {
                return Err(ProjError::InvalidParameter(format!(
                    "rotate takes 2 or 3 angles, got {}",
                    rotate.len()
                )));
            }
        }
        if let Some(precision) = self.precision {
            if !(precision >= 0.0) {
                return Err(ProjError::InvalidParameter(format!(
                    "precision must be non-negative, got {precision}"
                )));
            }
        }
        if let Some(angle) = self.clip_angle {
            if !(0.0..=180.0).contains(&angle) {
                return Err(ProjError::InvalidParameter(format!(
                    "clip angle must be within [0, 180], got {angle}"
                )));
            }
        }
        if let Some([[x0, y0], [x1, y1]]) = self.clip_extent {
            if !(x0 < x1 && y0 < y1) {
                return Err(ProjError::InvalidParameter(
                    "clip extent must be [[x0, y0], [x1, y1]] with x0 < x1 and y0 < y1".into(),
                ));
            }
        }
        Ok(())
    }

    /// Build the configured projection.
    pub fn build(&self) -> Result<Projection, ProjError> {
        self.validate()?;
        let mut projection = self.kind.projection();
        if let Some(scale) = self.scale {
            projection.set_scale(scale);
        }
        if let Some(translate) = self.translate {
            projection.set_translate(translate);
        }
        if let Some(center) = self.center {
            projection.set_center(center);
        }
        if let Some(rotate) = &self.rotate {
            projection.set_rotate(rotate);
        }
        if let Some(angle) = self.angle {
            projection.set_angle(angle);
        }
        projection
            .set_reflect_x(self.reflect_x)
            .set_reflect_y(self.reflect_y);
        if let Some(angle) = self.clip_angle {
            projection.set_clip_angle(Some(angle));
        }
        if self.clip_extent.is_some() {
            projection.set_clip_extent(self.clip_extent);
        }
        if let Some(precision) = self.precision {
            projection.set_precision(precision);
        }
        Ok(projection)
    }
}

impl FromStr for ProjectionOptions {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}
