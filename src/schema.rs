//! Declarative schema descriptors for the mapping engine.
//!
//! A type opts into mapping by implementing [`Mappable`]: it returns a
//! [`Schema`] describing its element tag, per-field roles, transforms and
//! child ordering, and hands out field values on request. Nothing is
//! discovered by introspection.
//!
//! ```
//! use xml_forge::schema::{FieldValue, Mappable, Schema};
//!
//! struct Componente {
//!     nome: String,
//!     peso: u32,
//! }
//!
//! impl Mappable for Componente {
//!     fn schema(&self) -> Option<Schema> {
//!         Some(Schema::new("componente").attribute("nome").attribute("peso"))
//!     }
//!
//!     fn field_value(&self, field: &str) -> FieldValue<'_> {
//!         match field {
//!             "nome" => self.nome.as_str().into(),
//!             "peso" => self.peso.into(),
//!             _ => FieldValue::Null,
//!         }
//!     }
//! }
//! ```

use crate::transform::{ChildComparator, NodeTransform, StringTransform};

/// A type that can be mapped onto a node tree.
pub trait Mappable {
    /// Name used as the element tag when the schema leaves it empty.
    fn type_name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        let base = full.split('<').next().unwrap_or(full);
        base.rsplit("::").next().unwrap_or(base)
    }

    /// The schema descriptor, or `None` for types that carry none.
    fn schema(&self) -> Option<Schema>;

    /// Text of the leaf produced when a value without a schema is placed in
    /// an element field. `None` leaves the leaf empty.
    fn to_scalar(&self) -> Option<String> {
        None
    }

    /// Value of a field named in the schema.
    fn field_value(&self, field: &str) -> FieldValue<'_>;
}

impl<T: Mappable + ?Sized> Mappable for &T {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn schema(&self) -> Option<Schema> {
        (**self).schema()
    }

    fn to_scalar(&self) -> Option<String> {
        (**self).to_scalar()
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        (**self).field_value(field)
    }
}

/// The value a field hands to the mapping engine.
pub enum FieldValue<'a> {
    Null,
    Scalar(String),
    Object(Box<dyn Mappable + 'a>),
    Sequence(Vec<FieldValue<'a>>),
}

impl<'a> FieldValue<'a> {
    pub fn object<T: Mappable + ?Sized>(value: &'a T) -> Self {
        Self::Object(Box::new(value))
    }

    pub fn sequence<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldValue<'a>>,
    {
        Self::Sequence(values.into_iter().map(Into::into).collect())
    }

    /// One `Object` per item, in order.
    pub fn objects<T: Mappable>(values: &'a [T]) -> Self {
        Self::Sequence(values.iter().map(Self::object).collect())
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(_) => "scalar",
            Self::Object(_) => "object",
            Self::Sequence(_) => "sequence",
        }
    }
}

impl std::fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Scalar(s) => f.debug_tuple("Scalar").field(s).finish(),
            Self::Object(o) => f.debug_tuple("Object").field(&o.type_name()).finish(),
            Self::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
        }
    }
}

impl From<&str> for FieldValue<'_> {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue<'_> {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&String> for FieldValue<'_> {
    fn from(value: &String) -> Self {
        Self::Scalar(value.clone())
    }
}

macro_rules! scalar_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue<'_> {
                fn from(value: $ty) -> Self {
                    Self::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from_display!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, bool, char);

// `{:?}` keeps the fractional part of integral floats: 6.0 renders as "6.0".
macro_rules! scalar_from_float {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue<'_> {
                fn from(value: $ty) -> Self {
                    Self::Scalar(format!("{value:?}"))
                }
            }
        )*
    };
}

scalar_from_float!(f32, f64);

impl<'a, T: Into<FieldValue<'a>>> From<Option<T>> for FieldValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Attribute role: the field becomes an attribute of the type's element.
#[derive(Debug, Clone, Default)]
pub struct AttributeRole {
    pub name: Option<String>,
    pub transform: StringTransform,
}

impl AttributeRole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute name; empty or unset means the field name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = (!name.is_empty()).then_some(name);
        self
    }

    pub fn transform(mut self, transform: StringTransform) -> Self {
        self.transform = transform;
        self
    }
}

/// Element role: the field becomes one or more child elements.
#[derive(Debug, Clone, Default)]
pub struct ElementRole {
    pub tag_name: Option<String>,
    pub create_parent: bool,
    pub text_transform: StringTransform,
}

impl ElementRole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag of leaf children and of the wrapping parent; empty or unset
    /// means the field name.
    pub fn tag_name(mut self, tag_name: impl Into<String>) -> Self {
        let tag_name = tag_name.into();
        self.tag_name = (!tag_name.is_empty()).then_some(tag_name);
        self
    }

    /// Wrap the mapped values in an intermediate element.
    pub fn create_parent(mut self, create_parent: bool) -> Self {
        self.create_parent = create_parent;
        self
    }

    /// Applied to the text of leaf children.
    pub fn text_transform(mut self, transform: StringTransform) -> Self {
        self.text_transform = transform;
        self
    }
}

/// How a field maps onto the output tree.
#[derive(Debug, Clone)]
pub enum Role {
    Attribute(AttributeRole),
    TagText,
    Element(ElementRole),
}

impl From<AttributeRole> for Role {
    fn from(role: AttributeRole) -> Self {
        Self::Attribute(role)
    }
}

impl From<ElementRole> for Role {
    fn from(role: ElementRole) -> Self {
        Self::Element(role)
    }
}

/// A field and the roles it declares. No roles means the field is ignored.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub roles: Vec<Role>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: Vec::new(),
        }
    }

    pub fn role(mut self, role: impl Into<Role>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// The single declared role, if exactly one.
    pub fn single_role(&self) -> Option<&Role> {
        match self.roles.as_slice() {
            [role] => Some(role),
            _ => None,
        }
    }

    pub fn is_tag_text(&self) -> bool {
        self.roles.iter().any(|r| matches!(r, Role::TagText))
    }
}

/// Per-type mapping metadata.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub tag_name: Option<String>,
    pub tag_text_transform: StringTransform,
    pub child_order: Option<ChildComparator>,
    pub post_build: Vec<NodeTransform>,
    pub fields: Vec<Field>,
}

impl Schema {
    /// A schema whose element tag is `tag_name`. An empty name falls back to
    /// the type name.
    pub fn new(tag_name: impl Into<String>) -> Self {
        let tag_name = tag_name.into();
        Self {
            tag_name: (!tag_name.is_empty()).then_some(tag_name),
            ..Self::default()
        }
    }

    /// Tag used for a value whose type is named `type_name`.
    pub fn element_tag_name<'a>(&'a self, type_name: &'a str) -> &'a str {
        self.tag_name.as_deref().unwrap_or(type_name)
    }

    pub fn tag_text_transform(mut self, transform: StringTransform) -> Self {
        self.tag_text_transform = transform;
        self
    }

    pub fn child_order(mut self, comparator: ChildComparator) -> Self {
        self.child_order = Some(comparator);
        self
    }

    pub fn post_build(mut self, transform: NodeTransform) -> Self {
        self.post_build.push(transform);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn attribute(self, field: &str) -> Self {
        self.field(Field::new(field).role(AttributeRole::new()))
    }

    pub fn attribute_with(self, field: &str, role: AttributeRole) -> Self {
        self.field(Field::new(field).role(role))
    }

    pub fn tag_text(self, field: &str) -> Self {
        self.field(Field::new(field).role(Role::TagText))
    }

    pub fn element(self, field: &str) -> Self {
        self.field(Field::new(field).role(ElementRole::new()))
    }

    pub fn element_with(self, field: &str, role: ElementRole) -> Self {
        self.field(Field::new(field).role(role))
    }

    /// Declares a field that contributes nothing.
    pub fn ignored(self, field: &str) -> Self {
        self.field(Field::new(field))
    }
}
