//! The `Grid` type: a single noise grid or a stack of same-shaped layers.

use std::path::Path;

use envira_parser::{fields, EnviraHeader};
use noise_common::{GridShape, LevelArray, NoiseUnit};
use tracing::debug;

use crate::error::{GridError, Result};
use crate::loader::extract_year;
use crate::types::Layers;

/// Header and array storage of a [`Grid`].
#[derive(Debug, Clone, PartialEq)]
pub enum GridLayers {
    /// One header describing one array.
    Single {
        header: EnviraHeader,
        array: LevelArray,
    },
    /// One header per array; all layers share a geometry.
    Multi {
        headers: Vec<EnviraHeader>,
        arrays: Vec<LevelArray>,
    },
}

/// A noise grid, usually one per year for a multigrid.
///
/// Derivations (`refine`, `resize`, `statistics`, `meteotoeslag_*`) return
/// new values and leave `self` untouched; `scale` is the only in-place
/// operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    layers: GridLayers,
    unit: NoiseUnit,
    shape: GridShape,
    sources: Vec<Option<String>>,
}

impl Grid {
    /// Build a grid from headers and arrays.
    ///
    /// `One` + `One` gives a single grid, `Many` + `Many` a multigrid. Mixing
    /// the two is a type error, lists of different length an index error.
    /// Layers must agree on geometry and unit, and every array must match the
    /// header geometry.
    pub fn new(
        headers: Layers<EnviraHeader>,
        arrays: Layers<LevelArray>,
        unit: NoiseUnit,
    ) -> Result<Self> {
        match (headers, arrays) {
            (Layers::One(header), Layers::One(array)) => {
                let shape = check_layers(
                    &["layer 0".to_string()],
                    std::slice::from_ref(&header),
                    std::slice::from_ref(&array),
                    &unit,
                )?;
                Ok(Self {
                    layers: GridLayers::Single { header, array },
                    unit,
                    shape,
                    sources: vec![None],
                })
            }
            (Layers::Many(headers), Layers::Many(arrays)) => {
                if headers.len() != arrays.len() {
                    return Err(GridError::LayerCountMismatch {
                        headers: headers.len(),
                        arrays: arrays.len(),
                    });
                }
                let names: Vec<String> =
                    (0..headers.len()).map(|i| format!("layer {}", i)).collect();
                Self::multi(names, headers, arrays, unit, None)
            }
            (headers, arrays) => Err(GridError::LayerArityMismatch {
                headers: headers.arity(),
                arrays: arrays.arity(),
            }),
        }
    }

    /// Assemble a multigrid, checking layer consistency against the first
    /// layer. `names` identify the layers in error messages.
    pub(crate) fn multi(
        names: Vec<String>,
        headers: Vec<EnviraHeader>,
        arrays: Vec<LevelArray>,
        unit: NoiseUnit,
        sources: Option<Vec<String>>,
    ) -> Result<Self> {
        if headers.is_empty() {
            return Err(GridError::invalid_argument(
                "a multigrid needs at least one layer",
            ));
        }
        let shape = check_layers(&names, &headers, &arrays, &unit)?;
        let sources = match sources {
            Some(names) => names.into_iter().map(Some).collect(),
            None => vec![None; headers.len()],
        };
        Ok(Self {
            layers: GridLayers::Multi { headers, arrays },
            unit,
            shape,
            sources,
        })
    }

    /// Attach originating file names to the layers, in layer order.
    ///
    /// Layer years are read from these names.
    pub fn with_sources<S: Into<String>>(mut self, names: Vec<S>) -> Result<Self> {
        if names.len() != self.layer_count() {
            return Err(GridError::invalid_argument(format!(
                "{} source names given for {} layers",
                names.len(),
                self.layer_count()
            )));
        }
        self.sources = names.into_iter().map(|n| Some(n.into())).collect();
        Ok(self)
    }

    /// Whether this is a multigrid.
    pub fn is_multigrid(&self) -> bool {
        matches!(self.layers, GridLayers::Multi { .. })
    }

    /// Number of layers (1 for a single grid).
    pub fn layer_count(&self) -> usize {
        match &self.layers {
            GridLayers::Single { .. } => 1,
            GridLayers::Multi { arrays, .. } => arrays.len(),
        }
    }

    /// Header and array storage.
    pub fn layers(&self) -> &GridLayers {
        &self.layers
    }

    /// The unit of every layer.
    pub fn unit(&self) -> &NoiseUnit {
        &self.unit
    }

    /// Geometry shared by all layers.
    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    /// The array of a single grid.
    pub fn array(&self) -> Result<&LevelArray> {
        match &self.layers {
            GridLayers::Single { array, .. } => Ok(array),
            GridLayers::Multi { .. } => Err(GridError::single_only("array")),
        }
    }

    /// The header of the first (or only) layer.
    pub fn header(&self) -> &EnviraHeader {
        &self.headers()[0]
    }

    /// Arrays of every layer, in layer order.
    pub fn arrays(&self) -> &[LevelArray] {
        match &self.layers {
            GridLayers::Single { array, .. } => std::slice::from_ref(array),
            GridLayers::Multi { arrays, .. } => arrays,
        }
    }

    /// Headers of every layer, in layer order.
    pub fn headers(&self) -> &[EnviraHeader] {
        match &self.layers {
            GridLayers::Single { header, .. } => std::slice::from_ref(header),
            GridLayers::Multi { headers, .. } => headers,
        }
    }

    /// Single-layer view of a multigrid layer, mainly for exporting one year.
    pub fn layer(&self, index: usize) -> Result<Grid> {
        let GridLayers::Multi { headers, arrays } = self.layers() else {
            return Err(GridError::multi_only("layer"));
        };
        let (header, array) = headers
            .get(index)
            .zip(arrays.get(index))
            .ok_or_else(|| {
                GridError::invalid_argument(format!(
                    "layer {} requested from a grid with {} layers",
                    index,
                    arrays.len()
                ))
            })?;

        let grid = Grid::new(
            Layers::One(header.clone()),
            Layers::One(array.clone()),
            self.unit().clone(),
        )?;
        match &self.sources()[index] {
            Some(name) => grid.with_sources(vec![name.clone()]),
            None => Ok(grid),
        }
    }

    pub(crate) fn arrays_mut(&mut self) -> &mut [LevelArray] {
        match &mut self.layers {
            GridLayers::Single { array, .. } => std::slice::from_mut(array),
            GridLayers::Multi { arrays, .. } => arrays,
        }
    }

    /// Originating file names, one per layer.
    pub fn sources(&self) -> &[Option<String>] {
        &self.sources
    }

    /// Year of every layer, read from its source name.
    pub fn years(&self) -> Vec<Option<u16>> {
        self.sources
            .iter()
            .map(|name| name.as_deref().and_then(extract_year))
            .collect()
    }

    /// Write a single grid as an Envira file.
    pub fn to_envira<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        match &self.layers {
            GridLayers::Single { header, array } => {
                envira_parser::encode(header, array, path)?;
                Ok(())
            }
            GridLayers::Multi { .. } => Err(GridError::single_only("to_envira")),
        }
    }

    /// Build a single grid from one array, taking the first header as a
    /// template for the given shape. The result has no source file, so its
    /// year is unknown.
    pub(crate) fn derive_single(&self, array: LevelArray, shape: GridShape) -> Self {
        let header = self.header().with_shape(&shape);
        debug!(rows = array.rows(), cols = array.cols(), "Derived single grid");
        Self {
            layers: GridLayers::Single { header, array },
            unit: self.unit.clone(),
            shape,
            sources: vec![None],
        }
    }

    /// Apply `f` to every layer, producing a grid of the given shape with the
    /// same variant, unit and sources.
    pub(crate) fn map_layers(
        &self,
        shape: GridShape,
        mut f: impl FnMut(&LevelArray) -> LevelArray,
    ) -> Self {
        let layers = match &self.layers {
            GridLayers::Single { header, array } => GridLayers::Single {
                header: header.with_shape(&shape),
                array: f(array),
            },
            GridLayers::Multi { headers, arrays } => GridLayers::Multi {
                headers: headers.iter().map(|h| h.with_shape(&shape)).collect(),
                arrays: arrays.iter().map(&mut f).collect(),
            },
        };
        Self {
            layers,
            unit: self.unit.clone(),
            shape,
            sources: self.sources.clone(),
        }
    }
}

/// Check that every layer agrees with the first and return the shared shape.
fn check_layers(
    names: &[String],
    headers: &[EnviraHeader],
    arrays: &[LevelArray],
    grid_unit: &NoiseUnit,
) -> Result<GridShape> {
    let shape = headers[0].shape()?;
    let unit = headers[0].get(fields::UNIT);
    if let Some(name) = unit {
        if name != grid_unit.as_str() {
            return Err(GridError::InconsistentHeaders {
                first: "grid unit".to_string(),
                other: names[0].clone(),
                detail: format!("unit {} vs {}", grid_unit, name),
            });
        }
    }
    let expected = shape.dims();

    for (i, (header, array)) in headers.iter().zip(arrays).enumerate() {
        if i > 0 {
            let other = header.shape()?;
            if !shape.same_geometry(&other) {
                return Err(GridError::InconsistentHeaders {
                    first: names[0].clone(),
                    other: names[i].clone(),
                    detail: format!("{} vs {}", shape, other),
                });
            }
            let other_unit = header.get(fields::UNIT);
            if other_unit != unit {
                return Err(GridError::InconsistentHeaders {
                    first: names[0].clone(),
                    other: names[i].clone(),
                    detail: format!(
                        "unit {} vs {}",
                        unit.unwrap_or("<none>"),
                        other_unit.unwrap_or("<none>")
                    ),
                });
            }
        }

        if array.shape() != expected {
            return Err(GridError::InconsistentData {
                first: names[0].clone(),
                other: names[i].clone(),
                expected,
                found: array.shape(),
            });
        }
    }

    Ok(shape)
}
