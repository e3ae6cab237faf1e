//! A mesh bundled with its materials.

use crate::error::{IndexKind, MeshError, Result};
use crate::material::Material;
use crate::mesh::Mesh;

/// A named mesh plus the materials its triangles' `group_index` refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    mesh: Mesh,
    materials: Vec<Material>,
}

impl Model {
    /// Create a model without materials.
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            materials: Vec::new(),
        }
    }

    /// Create a model carrying [`Material::default_material`], as the
    /// generators' callers expect.
    pub fn with_default_material(name: impl Into<String>, mesh: Mesh) -> Self {
        let mut model = Self::new(name, mesh);
        model.add_material(Material::default_material());
        model
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Replace the mesh, returning the previous one.
    pub fn replace_mesh(&mut self, mesh: Mesh) -> Mesh {
        std::mem::replace(&mut self.mesh, mesh)
    }

    /// Apply a mesh transformation, keeping name and materials.
    pub fn map_mesh<F>(self, f: F) -> Result<Self>
    where
        F: FnOnce(Mesh) -> Result<Mesh>,
    {
        Ok(Self {
            mesh: f(self.mesh)?,
            ..self
        })
    }

    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }

    /// Append a material, returning its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn materials_mut(&mut self) -> &mut [Material] {
        &mut self.materials
    }

    /// Get a material by index.
    pub fn material(&self, index: usize) -> Result<&Material> {
        self.materials.get(index).ok_or(MeshError::IndexOutOfRange {
            kind: IndexKind::Material,
            index,
            len: self.materials.len(),
        })
    }
}
