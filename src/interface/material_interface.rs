use super::material::{MaterialArrays, NormalSource};
use super::{
    CellCutter, EmittedPoint, InterfaceError, InterfaceOptions, InterfaceStats,
    MaterialCellOutput, MaterialDescription, MaterialSample, NormalArrays,
};
use crate::math::Real;
use crate::mesh::{PointAttributes, UnstructuredMesh};
use crate::utils::hashmap::{self, Entry, HashMap};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Reconstructs the interfaces of several materials over multi-block meshes.
///
/// Every block is an [`UnstructuredMesh`] whose cell arrays hold, for each material, its
/// volume fraction and optionally its interface normal and ordering key. The result gives,
/// for each material, one mesh per domain made of the interfaces (or filled regions) of this
/// material.
///
/// # Example
///
/// ```
/// use youngs::interface::{MaterialDescription, MaterialInterface};
/// use youngs::mesh::{DataArray, UnstructuredMesh};
/// use youngs::math::Point;
/// use youngs::shape::CellType;
///
/// let mut mesh = UnstructuredMesh::new(vec![
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(1.0, 0.0, 0.0),
///     Point::new(1.0, 1.0, 0.0),
///     Point::new(0.0, 1.0, 0.0),
/// ]);
/// mesh.push_cell(CellType::Quad, &[0, 1, 2, 3]);
/// mesh.cell_data.push(DataArray::scalars("water", vec![0.5]));
/// mesh.cell_data.push(DataArray::vectors("water_normal", &[[1.0, 0.0, 0.0]]));
///
/// let mut filter = MaterialInterface::default();
/// filter.push_material(MaterialDescription::new("water").with_normal("water_normal"));
///
/// let output = filter.reconstruct(&[mesh]).unwrap();
/// let water = output.materials[0][0].as_ref().unwrap();
/// assert_eq!(water.cell_type(0), CellType::Line);
/// assert!(water.points.iter().all(|p| (p.x - 0.5).abs() < 1.0e-9));
/// ```
#[derive(Clone, Debug)]
pub struct MaterialInterface {
    materials: Vec<MaterialDescription>,
    normal_arrays: HashMap<String, NormalArrays>,
    ordering_arrays: HashMap<String, String>,
    options: InterfaceOptions,
    use_all_blocks: bool,
}

impl Default for MaterialInterface {
    fn default() -> Self {
        Self::new(InterfaceOptions::default())
    }
}

/// The per-material meshes reconstructed from one block.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockReconstruction {
    /// One mesh per material, empty if the material produced nothing in this block.
    pub materials: Vec<UnstructuredMesh>,
    /// Counters of the recoverable conditions met.
    pub stats: InterfaceStats,
}

/// The result of [`MaterialInterface::reconstruct`].
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialInterfaceOutput {
    /// For each material, one slot per domain. Slots are filled in block order, skipping the
    /// blocks where the material produced nothing.
    pub materials: Vec<Vec<Option<UnstructuredMesh>>>,
    /// Counters of the recoverable conditions met, summed over all blocks.
    pub stats: InterfaceStats,
}

impl MaterialInterfaceOutput {
    /// The number of domain slots of the material `m`.
    pub fn num_domains(&self, m: usize) -> usize {
        self.materials.get(m).map_or(0, |d| d.len())
    }

    /// The non-empty meshes of the material `m`.
    pub fn domains(&self, m: usize) -> impl Iterator<Item = &UnstructuredMesh> {
        self.materials
            .get(m)
            .into_iter()
            .flatten()
            .filter_map(|d| d.as_ref())
    }
}

impl MaterialInterface {
    /// Creates a filter without any material.
    pub fn new(options: InterfaceOptions) -> Self {
        Self {
            materials: Vec::new(),
            normal_arrays: HashMap::default(),
            ordering_arrays: HashMap::default(),
            options,
            use_all_blocks: true,
        }
    }

    /// The reconstruction options.
    pub fn options(&self) -> &InterfaceOptions {
        &self.options
    }

    /// The reconstruction options, mutably.
    pub fn options_mut(&mut self) -> &mut InterfaceOptions {
        &mut self.options
    }

    /// The described materials.
    pub fn materials(&self) -> &[MaterialDescription] {
        &self.materials
    }

    /// The number of described materials.
    pub fn num_materials(&self) -> usize {
        self.materials.len()
    }

    /// Appends a material.
    pub fn push_material(&mut self, material: MaterialDescription) {
        self.materials.push(material);
    }

    /// Sets the arrays of the `index`-th material, adding materials as needed.
    ///
    /// `normal` follows [`NormalArrays::parse`]. An empty `ordering` means no ordering array.
    pub fn set_material_arrays(&mut self, index: usize, volume: &str, normal: &str, ordering: &str) {
        if index >= self.materials.len() {
            self.materials.resize_with(index + 1, MaterialDescription::default);
        }

        let material = &mut self.materials[index];
        material.volume = volume.to_string();
        material.normal = NormalArrays::parse(normal);
        material.ordering = (!ordering.is_empty()).then(|| ordering.to_string());
    }

    /// Sets the blocks the `index`-th material is reconstructed in, adding materials as
    /// needed. Only used when [`Self::use_all_blocks`] is `false`.
    pub fn set_material_blocks(&mut self, index: usize, blocks: Vec<usize>) {
        if index >= self.materials.len() {
            self.materials.resize_with(index + 1, MaterialDescription::default);
        }

        self.materials[index].blocks = blocks;
    }

    /// Removes every material.
    pub fn remove_all_materials(&mut self) {
        log::debug!("Removing all the {} materials.", self.materials.len());
        self.materials.clear();
    }

    /// Sets the normal arrays of the materials with the given volume fraction array and no
    /// normal of their own.
    pub fn set_normal_array_for(&mut self, volume: &str, names: &str) {
        let _ = self
            .normal_arrays
            .insert(volume.to_string(), NormalArrays::parse(names));
    }

    /// Sets the ordering array of the materials with the given volume fraction array and no
    /// ordering of their own.
    pub fn set_ordering_array_for(&mut self, volume: &str, name: &str) {
        let _ = self
            .ordering_arrays
            .insert(volume.to_string(), name.to_string());
    }

    /// Forgets every normal and ordering array set with [`Self::set_normal_array_for`] and
    /// [`Self::set_ordering_array_for`].
    pub fn remove_all_fallback_arrays(&mut self) {
        self.normal_arrays.clear();
        self.ordering_arrays.clear();
    }

    /// Are all materials reconstructed in every block?
    pub fn use_all_blocks(&self) -> bool {
        self.use_all_blocks
    }

    /// Sets whether all materials are reconstructed in every block, or only in the blocks
    /// listed in their description.
    pub fn set_use_all_blocks(&mut self, use_all_blocks: bool) {
        self.use_all_blocks = use_all_blocks;
    }

    fn applies_to_block(&self, material: usize, block: usize) -> bool {
        self.use_all_blocks || self.materials[material].blocks.contains(&block)
    }

    fn material_arrays<'a>(
        &self,
        material: usize,
        mesh: &'a UnstructuredMesh,
        block: usize,
    ) -> MaterialArrays<'a> {
        let desc = &self.materials[material];
        let normal = match (&desc.normal, self.normal_arrays.get(&desc.volume)) {
            (NormalArrays::None, Some(fallback)) => fallback,
            (normal, _) => normal,
        };
        let ordering = desc
            .ordering
            .as_ref()
            .or_else(|| self.ordering_arrays.get(&desc.volume));

        MaterialArrays {
            fraction: if self.applies_to_block(material, block) {
                mesh.cell_data_array(&desc.volume)
            } else {
                None
            },
            normal: NormalSource::lookup(normal, mesh),
            ordering: ordering.and_then(|name| mesh.cell_data_array(name)),
        }
    }

    /// Reconstructs the material interfaces of one block.
    ///
    /// `block_index` is only used to decide which materials apply to this block.
    pub fn reconstruct_block(
        &self,
        mesh: &UnstructuredMesh,
        block_index: usize,
    ) -> Result<BlockReconstruction, InterfaceError> {
        if self.materials.is_empty() {
            return Err(InterfaceError::NoMaterials);
        }

        mesh.validate()?;
        Ok(self.cut_block(mesh, block_index))
    }

    fn cut_block(&self, mesh: &UnstructuredMesh, block_index: usize) -> BlockReconstruction {
        let arrays: Vec<_> = (0..self.materials.len())
            .map(|m| self.material_arrays(m, mesh, block_index))
            .collect();
        let attributes = PointAttributes::new(&mesh.point_data);
        let cells = self.reconstruct_cells(mesh, &arrays, attributes);

        let mut builders: Vec<_> = (0..self.materials.len())
            .map(|_| MaterialMeshBuilder::new(mesh))
            .collect();
        let mut stats = InterfaceStats::default();

        for (cell, (outputs, cell_stats)) in cells.into_iter().enumerate() {
            stats += cell_stats;

            for (builder, output) in builders.iter_mut().zip(outputs) {
                if let Some(output) = output {
                    builder.push(mesh, cell, &output, &attributes);
                }
            }
        }

        BlockReconstruction {
            materials: builders.into_iter().map(|b| b.mesh).collect(),
            stats,
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn reconstruct_cells(
        &self,
        mesh: &UnstructuredMesh,
        arrays: &[MaterialArrays],
        attributes: PointAttributes,
    ) -> Vec<(Vec<Option<MaterialCellOutput>>, InterfaceStats)> {
        let mut cutter = CellCutter::new(self.options);
        let mut samples = Vec::with_capacity(arrays.len());

        (0..mesh.num_cells())
            .map(|cell| reconstruct_cell(&mut cutter, &mut samples, mesh, cell, arrays, &attributes))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn reconstruct_cells(
        &self,
        mesh: &UnstructuredMesh,
        arrays: &[MaterialArrays],
        attributes: PointAttributes,
    ) -> Vec<(Vec<Option<MaterialCellOutput>>, InterfaceStats)> {
        (0..mesh.num_cells())
            .into_par_iter()
            .map_init(
                || (CellCutter::new(self.options), Vec::with_capacity(arrays.len())),
                |(cutter, samples), cell| {
                    reconstruct_cell(cutter, samples, mesh, cell, arrays, &attributes)
                },
            )
            .collect()
    }

    /// Reconstructs the material interfaces of every block.
    ///
    /// Blocks without cells are skipped. Every other block is validated before any cell is
    /// cut.
    pub fn reconstruct(
        &self,
        blocks: &[UnstructuredMesh],
    ) -> Result<MaterialInterfaceOutput, InterfaceError> {
        if self.materials.is_empty() {
            return Err(InterfaceError::NoMaterials);
        }

        for block in blocks.iter().filter(|b| !b.is_empty()) {
            block.validate()?;
        }

        let num_domains = self.count_domains(blocks);
        let mut materials: Vec<Vec<Option<UnstructuredMesh>>> = (0..self.materials.len())
            .map(|_| vec![None; num_domains])
            .collect();
        let mut next_domain = vec![0; self.materials.len()];
        let mut stats = InterfaceStats::default();

        for (block_index, block) in blocks.iter().enumerate() {
            if block.is_empty() {
                log::debug!("Skipping the empty block {}.", block_index);
                continue;
            }

            let result = self.cut_block(block, block_index);
            stats += result.stats;

            for (m, mesh) in result.materials.into_iter().enumerate() {
                if mesh.is_empty() {
                    continue;
                }

                let domains = &mut materials[m];
                let slot = next_domain[m];
                next_domain[m] += 1;

                if slot >= domains.len() {
                    domains.resize(slot + 1, None);
                }

                domains[slot] = Some(mesh);
            }
        }

        log::debug!(
            "Reconstructed {} materials over {} blocks: {:?}",
            self.materials.len(),
            blocks.len(),
            stats
        );

        Ok(MaterialInterfaceOutput { materials, stats })
    }

    /// The largest number of blocks any material appears in.
    fn count_domains(&self, blocks: &[UnstructuredMesh]) -> usize {
        let min_fraction = self.options.min_fraction();

        (0..self.materials.len())
            .map(|m| {
                blocks
                    .iter()
                    .enumerate()
                    .filter(|(b, block)| {
                        !block.is_empty()
                            && self.applies_to_block(m, *b)
                            && block
                                .cell_data_array(&self.materials[m].volume)
                                .and_then(|a| a.max_component(0))
                                .is_some_and(|max| max > min_fraction)
                    })
                    .count()
            })
            .max()
            .unwrap_or(0)
    }
}

fn reconstruct_cell(
    cutter: &mut CellCutter,
    samples: &mut Vec<MaterialSample>,
    mesh: &UnstructuredMesh,
    cell: usize,
    arrays: &[MaterialArrays],
    attributes: &PointAttributes,
) -> (Vec<Option<MaterialCellOutput>>, InterfaceStats) {
    samples.clear();
    samples.extend(arrays.iter().map(|a| a.sample(cell)));

    let info = cutter.cell_info(mesh.cell_type(cell), mesh.cell_points(cell), &mesh.points);
    let result = cutter.process(info, samples, attributes);
    (result.outputs, result.stats)
}

/// Accumulates the cells emitted for one material into a mesh.
struct MaterialMeshBuilder {
    mesh: UnstructuredMesh,
    point_map: HashMap<u32, u32>,
    ids: Vec<u32>,
    tuple: Vec<Real>,
}

impl MaterialMeshBuilder {
    fn new(source: &UnstructuredMesh) -> Self {
        Self {
            mesh: source.empty_like(),
            point_map: hashmap::with_capacity(0),
            ids: Vec::new(),
            tuple: Vec::new(),
        }
    }

    fn push(
        &mut self,
        source: &UnstructuredMesh,
        cell: usize,
        output: &MaterialCellOutput,
        attributes: &PointAttributes,
    ) {
        let stride = attributes.stride();
        self.ids.clear();

        for point in &output.points {
            let id = match point {
                EmittedPoint::MeshPoint(id) => match self.point_map.entry(*id) {
                    Entry::Occupied(e) => *e.get(),
                    Entry::Vacant(e) => {
                        let new_id = self.mesh.points.len() as u32;
                        self.mesh.points.push(source.points[*id as usize]);
                        self.tuple.clear();
                        attributes.gather(*id, &mut self.tuple);
                        attributes.scatter(&self.tuple, &mut self.mesh.point_data);
                        *e.insert(new_id)
                    }
                },
                EmittedPoint::NewPoint(k) => {
                    let k = *k as usize;
                    let new_id = self.mesh.points.len() as u32;
                    self.mesh.points.push(output.new_points[k]);
                    attributes.scatter(
                        &output.new_attributes[k * stride..(k + 1) * stride],
                        &mut self.mesh.point_data,
                    );
                    new_id
                }
            };

            self.ids.push(id);
        }

        self.mesh.push_cell(output.cell_type, &self.ids);

        for (dst, src) in self.mesh.cell_data.iter_mut().zip(&source.cell_data) {
            dst.push_tuple(src.tuple(cell));
        }
    }
}
