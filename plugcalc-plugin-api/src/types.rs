//! Module export manifest and the metadata attached to exported types

use crate::Calculator;

/// Constructor the host calls to instantiate an exported type.
pub type Constructor = fn() -> Box<dyn Calculator>;

/// Function a module provides to describe what it exports.
pub type ExportsFn = fn() -> ModuleExports;

/// Descriptive marker a type must carry to be picked up by the host.
///
/// The description is informational only; the host checks for its presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// Human-readable description of the plugin
    pub description: &'static str,
}

impl PluginDescriptor {
    pub const fn new(description: &'static str) -> Self {
        Self { description }
    }

    /// A marker with a blank description does not count.
    pub fn is_valid(&self) -> bool {
        !self.description.trim().is_empty()
    }
}

/// Identifier of a capability set an exported type declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capability(pub &'static str);

impl Capability {
    /// The two-operand integer calculator interface ([`Calculator`]).
    pub const CALCULATOR: Self = Self("plugcalc.calculator");
}

/// One type exported by a plugin module, with the metadata the host filters on.
#[derive(Debug, Clone)]
pub struct ExportedType {
    /// Type name, used in logs and listings
    pub type_name: &'static str,
    /// Descriptive marker, if the type carries one
    pub descriptor: Option<PluginDescriptor>,
    /// Capability sets the type declares
    pub capabilities: Vec<Capability>,
    /// Zero-argument constructor, if the type has one
    pub constructor: Option<Constructor>,
}

impl ExportedType {
    /// Export a calculator type constructed through its `Default` impl.
    ///
    /// Declares [`Capability::CALCULATOR`] but carries no descriptor yet;
    /// chain [`described`](Self::described) to make it eligible.
    pub fn calculator<T>() -> Self
    where
        T: Calculator + Default + 'static,
    {
        Self {
            type_name: short_type_name(std::any::type_name::<T>()),
            descriptor: None,
            capabilities: vec![Capability::CALCULATOR],
            constructor: Some(construct::<T> as Constructor),
        }
    }

    /// Export a type with no capabilities and no constructor.
    pub fn opaque(type_name: &'static str) -> Self {
        Self {
            type_name,
            descriptor: None,
            capabilities: Vec::new(),
            constructor: None,
        }
    }

    /// Attach the descriptive marker.
    pub fn described(mut self, description: &'static str) -> Self {
        self.descriptor = Some(PluginDescriptor::new(description));
        self
    }

    /// Declare an additional capability set.
    pub fn with_capability(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    /// Drop the constructor, leaving a type the host cannot instantiate.
    pub fn without_constructor(mut self) -> Self {
        self.constructor = None;
        self
    }

    /// Whether the type carries a usable descriptive marker.
    pub fn has_descriptor(&self) -> bool {
        self.descriptor.is_some_and(|d| d.is_valid())
    }

    /// Whether the type declares the given capability set.
    pub fn declares(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Eligible for loading: marker present and calculator capability declared.
    pub fn is_eligible(&self) -> bool {
        self.has_descriptor() && self.declares(Capability::CALCULATOR)
    }
}

/// Last path segment of a type name, without generic arguments.
///
/// `my_plugin::Scaled<core::num::Wrapping<i32>>` becomes `Scaled`.
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

fn construct<T>() -> Box<dyn Calculator>
where
    T: Calculator + Default + 'static,
{
    Box::new(T::default())
}

/// Everything one module exports, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ModuleExports {
    pub types: Vec<ExportedType>,
}

impl ModuleExports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, exported: ExportedType) -> Self {
        self.types.push(exported);
        self
    }

    /// Exported types that pass the host's eligibility filter, in order.
    pub fn eligible(&self) -> impl Iterator<Item = &ExportedType> {
        self.types.iter().filter(|t| t.is_eligible())
    }
}
