//! Member lookup over static type descriptions.
//!
//! Types opt in by implementing [`Reflect`] and pointing at a `'static`
//! [`TypeInfo`] that names their parent. Lookups walk from a type towards the
//! root of that chain and stop at an optional [`Brake`].

use crate::utils::error::{KitError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub type_name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: &'static str,
    pub params: &'static [&'static str],
    pub return_type: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructorInfo {
    pub params: &'static [&'static str],
}

#[derive(Debug)]
pub struct TypeInfo {
    pub name: &'static str,
    pub parent: Option<&'static TypeInfo>,
    pub fields: &'static [FieldInfo],
    pub methods: &'static [MethodInfo],
    pub constructors: &'static [ConstructorInfo],
}

impl TypeInfo {
    /// Descriptors are compared by identity; two statics with equal contents
    /// are still different types.
    pub fn is(&self, other: &TypeInfo) -> bool {
        std::ptr::eq(self, other)
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.is(other)
    }
}

impl Eq for TypeInfo {}

pub trait Reflect {
    fn type_info() -> &'static TypeInfo;
}

/// Where an upward walk stops.
#[derive(Debug, Clone, Copy)]
pub struct Brake {
    pub at: &'static TypeInfo,
    pub inclusive: bool,
}

impl Brake {
    pub fn including(at: &'static TypeInfo) -> Self {
        Self { at, inclusive: true }
    }

    pub fn excluding(at: &'static TypeInfo) -> Self {
        Self {
            at,
            inclusive: false,
        }
    }

    pub fn including_type<T: Reflect>() -> Self {
        Self::including(T::type_info())
    }

    pub fn excluding_type<T: Reflect>() -> Self {
        Self::excluding(T::type_info())
    }
}

/// `ty` followed by its ancestors, cut at the brake. A brake that is not on
/// the chain has no effect.
pub fn hierarchy(ty: &'static TypeInfo, brake: Option<Brake>) -> Vec<&'static TypeInfo> {
    let mut chain = Vec::new();
    let mut current = Some(ty);

    while let Some(info) = current {
        if let Some(brake) = brake {
            if info.is(brake.at) {
                if brake.inclusive {
                    chain.push(info);
                }
                break;
            }
        }
        chain.push(info);
        current = info.parent;
    }
    chain
}

pub fn is_subtype_of(ty: &'static TypeInfo, ancestor: &TypeInfo) -> bool {
    hierarchy(ty, None).iter().any(|info| info.is(ancestor))
}

fn not_found(kind: &str, name: impl Into<String>, ty: &TypeInfo) -> KitError {
    KitError::NotFound {
        kind: kind.to_string(),
        name: name.into(),
        owner: ty.name.to_string(),
    }
}

fn describe(name: &str, params: &[&str]) -> String {
    format!("{}({})", name, params.join(", "))
}

/// Nearest declaration of `name`, searching subclass first.
pub fn find_field(
    ty: &'static TypeInfo,
    name: &str,
    brake: Option<Brake>,
) -> Result<&'static FieldInfo> {
    hierarchy(ty, brake)
        .into_iter()
        .flat_map(|info| info.fields.iter())
        .find(|field| field.name == name)
        .ok_or_else(|| not_found("field", name, ty))
}

/// Every field on the walked chain, subclass first. Shadowed fields are kept.
pub fn fields(ty: &'static TypeInfo, brake: Option<Brake>) -> Vec<&'static FieldInfo> {
    hierarchy(ty, brake)
        .into_iter()
        .flat_map(|info| info.fields.iter())
        .collect()
}

pub fn find_method(
    ty: &'static TypeInfo,
    name: &str,
    params: &[&str],
    brake: Option<Brake>,
) -> Result<&'static MethodInfo> {
    hierarchy(ty, brake)
        .into_iter()
        .flat_map(|info| info.methods.iter())
        .find(|method| method.name == name && method.params == params)
        .ok_or_else(|| not_found("method", describe(name, params), ty))
}

/// Every method on the walked chain; an override hides the ancestor's
/// method with the same signature.
pub fn methods(ty: &'static TypeInfo, brake: Option<Brake>) -> Vec<&'static MethodInfo> {
    let mut out: Vec<&'static MethodInfo> = Vec::new();
    for method in hierarchy(ty, brake)
        .into_iter()
        .flat_map(|info| info.methods.iter())
    {
        let overridden = out
            .iter()
            .any(|seen| seen.name == method.name && seen.params == method.params);
        if !overridden {
            out.push(method);
        }
    }
    out
}

pub fn find_constructor(
    ty: &'static TypeInfo,
    params: &[&str],
    brake: Option<Brake>,
) -> Result<&'static ConstructorInfo> {
    hierarchy(ty, brake)
        .into_iter()
        .flat_map(|info| info.constructors.iter())
        .find(|ctor| ctor.params == params)
        .ok_or_else(|| not_found("constructor", describe(ty.name, params), ty))
}

pub fn constructors(
    ty: &'static TypeInfo,
    brake: Option<Brake>,
) -> Vec<(&'static TypeInfo, &'static ConstructorInfo)> {
    hierarchy(ty, brake)
        .into_iter()
        .flat_map(|info| info.constructors.iter().map(move |ctor| (info, ctor)))
        .collect()
}
