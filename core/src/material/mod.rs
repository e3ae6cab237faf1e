//! Material definitions attached to a [`Model`](crate::model::Model).
//!
//! A [`Material`] is a name, a shading model and a flat list of named
//! parameters. Parameter names follow the authoring tool's conventions
//! (`Diffuse`, `Specular`, `Shininess`, ...); the geometry kernel never
//! interprets them except for [`randomize_material_colors`], which looks for
//! a `Diffuse` color.
//!
//! [`randomize_material_colors`]: crate::ops::randomize_material_colors

use std::fmt;

/// Name of the diffuse color parameter.
pub const DIFFUSE: &str = "Diffuse";

/// A typed material parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatParamValue {
    /// Integer value (flags, enum selectors).
    Int(i32),
    /// Single float (shininess, opacity).
    Float(f32),
    /// 2-component float vector.
    Float2([f32; 2]),
    /// 3-component float vector.
    Float3([f32; 3]),
    /// 4-component float vector.
    Float4([f32; 4]),
    /// RGBA color.
    Color([f32; 4]),
}

impl MatParamValue {
    /// The color as `[r, g, b, a]`, if this is a [`Color`](Self::Color).
    pub fn as_color(&self) -> Option<[f32; 4]> {
        match self {
            Self::Color(rgba) => Some(*rgba),
            _ => None,
        }
    }
}

/// A named material parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct MatParam {
    pub name: String,
    pub value: MatParamValue,
}

impl MatParam {
    pub fn new(name: impl Into<String>, value: MatParamValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Shading model of a material.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Shading {
    /// No specific shading model.
    #[default]
    Default,
    /// Diffuse-only shading.
    Lambert,
    /// Diffuse plus specular highlight.
    Phong,
    /// Named shader from the authoring tool.
    Custom(String),
}

impl fmt::Display for Shading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Lambert => write!(f, "lambert"),
            Self::Phong => write!(f, "phong"),
            Self::Custom(name) => write!(f, "{name}"),
        }
    }
}

/// A material: name, shading model and parameters.
///
/// # Example
///
/// ```
/// use wiregrid_core::material::{MatParamValue, Material, Shading};
///
/// let mut mat = Material::new("red").with_shading(Shading::Lambert);
/// mat.add_param("Diffuse", MatParamValue::Color([1.0, 0.0, 0.0, 1.0]));
/// mat.add_param("Diffuse", MatParamValue::Color([0.5, 0.0, 0.0, 1.0]));
/// assert_eq!(mat.params().len(), 1);
/// assert!(mat.has_param("Diffuse"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    name: String,
    shading: Shading,
    params: Vec<MatParam>,
}

impl Material {
    /// Create a material with default shading and no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shading: Shading::Default,
            params: Vec::new(),
        }
    }

    /// The material given to generated meshes: Lambert shading with a light
    /// grey `Diffuse` color.
    pub fn default_material() -> Self {
        let mut material = Self::new("default").with_shading(Shading::Lambert);
        material.add_param(DIFFUSE, MatParamValue::Color([0.75, 0.75, 0.75, 1.0]));
        material
    }

    pub fn with_shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }

    /// Builder form of [`add_param`](Self::add_param).
    pub fn with_param(mut self, name: impl Into<String>, value: MatParamValue) -> Self {
        self.add_param(name, value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shading(&self) -> &Shading {
        &self.shading
    }

    pub fn params(&self) -> &[MatParam] {
        &self.params
    }

    /// Add a parameter, replacing any existing parameter with the same name.
    pub fn add_param(&mut self, name: impl Into<String>, value: MatParamValue) {
        let name = name.into();
        match self.params.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.value = value,
            None => self.params.push(MatParam { name, value }),
        }
    }

    /// Look up a parameter by name.
    pub fn param(&self, name: &str) -> Option<&MatParamValue> {
        self.params.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    /// Mutable lookup of a parameter by name.
    pub fn param_mut(&mut self, name: &str) -> Option<&mut MatParamValue> {
        self.params
            .iter_mut()
            .find(|p| p.name == name)
            .map(|p| &mut p.value)
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.param(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_param_replaces_by_name() {
        let mut mat = Material::new("m");
        mat.add_param("Shininess", MatParamValue::Float(8.0));
        mat.add_param(DIFFUSE, MatParamValue::Color([1.0; 4]));
        mat.add_param("Shininess", MatParamValue::Float(32.0));
        assert_eq!(mat.params().len(), 2);
        assert_eq!(mat.params()[0].name, "Shininess");
        assert_eq!(mat.param("Shininess"), Some(&MatParamValue::Float(32.0)));
        assert_eq!(mat.param("Missing"), None);
    }

    #[test]
    fn test_default_material() {
        let mat = Material::default_material();
        assert_eq!(mat.name(), "default");
        assert_eq!(mat.shading(), &Shading::Lambert);
        assert_eq!(
            mat.param(DIFFUSE).and_then(MatParamValue::as_color),
            Some([0.75, 0.75, 0.75, 1.0])
        );
    }

    #[test]
    fn test_param_mut() {
        let mut mat = Material::new("m").with_param("Opacity", MatParamValue::Float(1.0));
        if let Some(MatParamValue::Float(v)) = mat.param_mut("Opacity") {
            *v = 0.5;
        }
        assert_eq!(mat.param("Opacity"), Some(&MatParamValue::Float(0.5)));
    }

    #[test]
    fn test_shading_display() {
        assert_eq!(Shading::Phong.to_string(), "phong");
        assert_eq!(Shading::Custom("toon".into()).to_string(), "toon");
    }
}
