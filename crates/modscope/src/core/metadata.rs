//! Module and model metadata
//!
//! These types describe the host application's module graph as supplied by
//! the metadata collaborator. The generators only ever read them through the
//! [`MetadataSource`] trait; [`Snapshot`] is the in-memory implementation,
//! loadable from JSON:
//!
//! ```
//! use modscope::core::{MetadataSource, Snapshot};
//!
//! let snapshot = Snapshot::from_json(r#"{
//!     "modules": [
//!         { "name": "base" },
//!         { "name": "sale", "dependencies": ["base"], "application": true }
//!     ],
//!     "models": [
//!         { "name": "sale.order", "modules": ["sale"],
//!           "fields": [{ "name": "partner_id", "type": "many2one", "relation": "res.partner" }] }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(snapshot.models_of("sale").len(), 1);
//! assert_eq!(snapshot.dependents("base")[0].name, "sale");
//! ```

use std::fmt;
use std::io::Read;

use serde::{Deserialize, Serialize};

use super::DiagramError;

/// Installation state of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum ModuleState {
    #[default]
    #[serde(rename = "installed")]
    Installed,
    #[serde(rename = "uninstalled")]
    Uninstalled,
    #[serde(rename = "to install", alias = "to_install")]
    ToInstall,
    #[serde(rename = "to upgrade", alias = "to_upgrade")]
    ToUpgrade,
    #[serde(rename = "to remove", alias = "to_remove")]
    ToRemove,
    #[serde(rename = "uninstallable")]
    Uninstallable,
}

impl fmt::Display for ModuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleState::Installed => write!(f, "installed"),
            ModuleState::Uninstalled => write!(f, "uninstalled"),
            ModuleState::ToInstall => write!(f, "to install"),
            ModuleState::ToUpgrade => write!(f, "to upgrade"),
            ModuleState::ToRemove => write!(f, "to remove"),
            ModuleState::Uninstallable => write!(f, "uninstallable"),
        }
    }
}

/// A named unit of declared models with a list of modules it depends on
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Module {
    pub name: String,
    /// Direct dependencies, by module name, in declaration order
    pub dependencies: Vec<String>,
    pub application: bool,
    pub auto_install: bool,
    pub state: ModuleState,
    pub short_desc: String,
    pub summary: String,
    pub author: String,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.dependencies.push(name.into());
        self
    }

    pub fn with_state(mut self, state: ModuleState) -> Self {
        self.state = state;
        self
    }

    pub fn with_application(mut self, application: bool) -> Self {
        self.application = application;
        self
    }

    pub fn with_description(
        mut self,
        short_desc: impl Into<String>,
        summary: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        self.short_desc = short_desc.into();
        self.summary = summary.into();
        self.author = author.into();
        self
    }

    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|d| d == name)
    }
}

/// Structural flavour of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Regular,
    /// Short-lived records, typically wizards
    Transient,
    Abstract,
}

/// Declaration options of a model, with the framework defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOptions {
    pub table: Option<String>,
    pub auto: bool,
    pub date_name: String,
    pub fold_name: String,
    pub rec_name: Option<String>,
    pub order: String,
    pub parent_name: String,
    pub parent_store: bool,
    pub parent_order: Option<String>,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            table: None,
            auto: true,
            date_name: "date".to_string(),
            fold_name: "fold".to_string(),
            rec_name: None,
            order: "id".to_string(),
            parent_name: "parent_id".to_string(),
            parent_store: false,
            parent_order: None,
        }
    }
}

/// Composition by delegation: records of `model` are embedded through `field`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    pub model: String,
    pub field: String,
}

impl Delegation {
    pub fn new(model: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            field: field.into(),
        }
    }
}

/// Relational shape of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    Many2one,
    One2many,
    Many2many,
}

/// Field types of the host framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Char,
    Text,
    Html,
    Integer,
    Float,
    Monetary,
    Boolean,
    Date,
    Datetime,
    Binary,
    Selection,
    Reference,
    Many2one,
    One2many,
    Many2many,
}

impl FieldType {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldType::Many2one => FieldKind::Many2one,
            FieldType::One2many => FieldKind::One2many,
            FieldType::Many2many => FieldKind::Many2many,
            _ => FieldKind::Scalar,
        }
    }

    /// Type name as shown in attribute lines, e.g. `Many2one`
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::Char => "Char",
            FieldType::Text => "Text",
            FieldType::Html => "Html",
            FieldType::Integer => "Integer",
            FieldType::Float => "Float",
            FieldType::Monetary => "Monetary",
            FieldType::Boolean => "Boolean",
            FieldType::Date => "Date",
            FieldType::Datetime => "Datetime",
            FieldType::Binary => "Binary",
            FieldType::Selection => "Selection",
            FieldType::Reference => "Reference",
            FieldType::Many2one => "Many2one",
            FieldType::One2many => "One2many",
            FieldType::Many2many => "Many2many",
        }
    }

    /// Whether a `size` hint applies
    pub fn is_sized(&self) -> bool {
        matches!(self, FieldType::Char | FieldType::Reference)
    }
}

/// What happens to referencing records when the target is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnDelete {
    #[serde(rename = "cascade")]
    Cascade,
    #[serde(rename = "restrict")]
    Restrict,
    #[serde(rename = "set null", alias = "set_null")]
    SetNull,
    #[serde(rename = "set default", alias = "set_default")]
    SetDefault,
    /// Any policy without a dedicated rendering
    #[serde(other)]
    Other,
}

impl OnDelete {
    /// Deletion policies that make the relation a composition
    pub fn is_owning(&self) -> bool {
        matches!(self, OnDelete::Cascade | OnDelete::Restrict)
    }
}

/// Boolean and textual attribute flags of a field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldFeatures {
    pub required: bool,
    pub readonly: bool,
    pub store: bool,
    pub copy: bool,
    pub index: bool,
    pub translate: bool,
    pub manual: bool,
    pub auto_join: bool,
    pub company_dependent: bool,
    /// The field implements a delegation entry
    pub delegate: bool,
    /// The default value is computed by a callable
    pub callable_default: bool,
    /// Compute method name
    pub compute: Option<String>,
    /// Inverse method name of a computed field
    pub inverse: Option<String>,
    /// Search method name of a computed field
    pub search: Option<String>,
    /// Related path, one entry per hop
    pub related: Option<Vec<String>>,
    pub groups: Option<String>,
    pub states: bool,
    pub domain: Option<String>,
    /// Aggregation operator, only when set explicitly on the field
    pub group_operator: Option<String>,
}

/// A field of a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Target model of relational fields
    #[serde(default)]
    pub relation: Option<String>,
    #[serde(default)]
    pub size: Option<u32>,
    /// Modules declaring this field; empty means the model's own modules
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default)]
    pub on_delete: Option<OnDelete>,
    /// Many-to-one field on the target that this one-to-many mirrors
    #[serde(default)]
    pub inverse_name: Option<String>,
    /// Explicit join table of a many-to-many field
    #[serde(default)]
    pub relation_table: Option<String>,
    #[serde(default)]
    pub column1: Option<String>,
    #[serde(default)]
    pub column2: Option<String>,
    #[serde(flatten)]
    pub features: FieldFeatures,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            relation: None,
            size: None,
            modules: Vec::new(),
            on_delete: None,
            inverse_name: None,
            relation_table: None,
            column1: None,
            column2: None,
            features: FieldFeatures::default(),
        }
    }

    pub fn with_relation(mut self, model: impl Into<String>) -> Self {
        self.relation = Some(model.into());
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.modules.push(module.into());
        self
    }

    pub fn with_on_delete(mut self, on_delete: OnDelete) -> Self {
        self.on_delete = Some(on_delete);
        self
    }

    pub fn with_inverse_name(mut self, name: impl Into<String>) -> Self {
        self.inverse_name = Some(name.into());
        self
    }

    pub fn with_features(mut self, features: FieldFeatures) -> Self {
        self.features = features;
        self
    }

    pub fn required(mut self) -> Self {
        self.features.required = true;
        self
    }

    pub fn kind(&self) -> FieldKind {
        self.field_type.kind()
    }

    /// Whether `module` declares this field, given the model it belongs to
    pub fn declared_by(&self, module: &str, model: &Model) -> bool {
        if self.modules.is_empty() {
            model.declared_in(module)
        } else {
            self.modules.iter().any(|m| m == module)
        }
    }
}

/// A method defined on a model
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Method {
    pub name: String,
    /// Parameters as written in the signature
    pub params: Vec<String>,
    /// Module defining this implementation; `None` means the model's first module
    pub module: Option<String>,
    pub decorators: Vec<String>,
    /// The method redefines a same-named inherited method
    pub overrides: bool,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_params(mut self, params: &[&str]) -> Self {
        self.params = params.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_decorator(mut self, decorator: impl Into<String>) -> Self {
        self.decorators.push(decorator.into());
        self
    }

    pub fn overriding(mut self) -> Self {
        self.overrides = true;
        self
    }

    /// Whether `module` defines this implementation, given its model
    pub fn defined_by(&self, module: &str, model: &Model) -> bool {
        match &self.module {
            Some(m) => m == module,
            None => model.modules.first().is_some_and(|m| m == module),
        }
    }
}

/// A structural type declared within one or more modules
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Model {
    /// Fully qualified dotted name, e.g. `sale.order`
    pub name: String,
    pub description: String,
    /// Modules declaring or extending the model
    pub modules: Vec<String>,
    pub transient: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    /// Base model names
    pub inherit: Vec<String>,
    /// Delegation targets
    pub inherits: Vec<Delegation>,
    pub options: ModelOptions,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.modules.push(module.into());
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_inherit(mut self, base: impl Into<String>) -> Self {
        self.inherit.push(base.into());
        self
    }

    pub fn with_delegation(mut self, delegation: Delegation) -> Self {
        self.inherits.push(delegation);
        self
    }

    pub fn with_options(mut self, options: ModelOptions) -> Self {
        self.options = options;
        self
    }

    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    pub fn abstract_model(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Abstract wins over transient
    pub fn kind(&self) -> ModelKind {
        if self.is_abstract {
            ModelKind::Abstract
        } else if self.transient {
            ModelKind::Transient
        } else {
            ModelKind::Regular
        }
    }

    pub fn declared_in(&self, module: &str) -> bool {
        self.modules.iter().any(|m| m == module)
    }

    /// Database table: the explicit option, or the dotted name with underscores
    pub fn table(&self) -> String {
        self.options
            .table
            .clone()
            .unwrap_or_else(|| self.name.replace('.', "_"))
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Read-only access to the host application's metadata
///
/// Implementations must be deterministic: the same source must return the
/// same modules and models in the same order on every call.
pub trait MetadataSource {
    /// Look up a module by name
    fn module(&self, name: &str) -> Option<&Module>;

    /// Every module known to the host, in a stable order
    fn modules(&self) -> Vec<&Module>;

    /// Models whose declaring-module set contains `module`
    fn models_of(&self, module: &str) -> Vec<&Model>;

    /// Method names provided by the framework base class of `kind`
    fn framework_methods(&self, kind: ModelKind) -> &[String];

    /// Every module listing `module` as a direct dependency, sorted by name
    fn dependents(&self, module: &str) -> Vec<&Module> {
        let mut found: Vec<&Module> = self
            .modules()
            .into_iter()
            .filter(|m| m.depends_on(module))
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }
}

const BASE_METHODS: &[&str] = &[
    "browse",
    "check_access_rights",
    "check_access_rule",
    "copy",
    "copy_data",
    "create",
    "default_get",
    "ensure_one",
    "exists",
    "fields_get",
    "fields_view_get",
    "filtered",
    "init",
    "mapped",
    "name_create",
    "name_get",
    "name_search",
    "onchange",
    "read",
    "read_group",
    "search",
    "search_count",
    "search_read",
    "sorted",
    "sudo",
    "toggle_active",
    "unlink",
    "with_context",
    "write",
    "_auto_init",
    "_compute_display_name",
    "_register_hook",
    "_validate_fields",
];

/// Framework base method names per model kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkMethods {
    pub model: Vec<String>,
    pub transient: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_model: Vec<String>,
}

impl Default for FrameworkMethods {
    fn default() -> Self {
        let base: Vec<String> = BASE_METHODS.iter().map(|m| m.to_string()).collect();
        let mut transient = base.clone();
        transient.push("_transient_vacuum".to_string());
        Self {
            model: base.clone(),
            transient,
            abstract_model: base,
        }
    }
}

impl FrameworkMethods {
    pub fn for_kind(&self, kind: ModelKind) -> &[String] {
        match kind {
            ModelKind::Regular => &self.model,
            ModelKind::Transient => &self.transient,
            ModelKind::Abstract => &self.abstract_model,
        }
    }
}

/// In-memory metadata snapshot
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub modules: Vec<Module>,
    pub models: Vec<Model>,
    pub framework_methods: FrameworkMethods,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(input: &str) -> Result<Self, DiagramError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DiagramError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json(&self) -> Result<String, DiagramError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.models.push(model);
        self
    }

    pub fn with_framework_methods(mut self, methods: FrameworkMethods) -> Self {
        self.framework_methods = methods;
        self
    }
}

impl MetadataSource for Snapshot {
    fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    fn modules(&self) -> Vec<&Module> {
        self.modules.iter().collect()
    }

    fn models_of(&self, module: &str) -> Vec<&Model> {
        self.models.iter().filter(|m| m.declared_in(module)).collect()
    }

    fn framework_methods(&self, kind: ModelKind) -> &[String] {
        self.framework_methods.for_kind(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot::new()
            .with_module(Module::new("base"))
            .with_module(Module::new("sale").with_dependency("base"))
            .with_module(Module::new("account").with_dependency("base"))
            .with_model(Model::new("res.partner").with_module("base").with_module("sale"))
            .with_model(Model::new("sale.order").with_module("sale"))
    }

    #[test]
    fn test_models_of_follows_declaring_modules() {
        let snapshot = snapshot();
        let names: Vec<_> = snapshot.models_of("sale").iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["res.partner", "sale.order"]);
        assert!(snapshot.models_of("account").is_empty());
    }

    #[test]
    fn test_dependents_sorted() {
        let snapshot = snapshot();
        let names: Vec<_> = snapshot.dependents("base").iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["account", "sale"]);
    }

    #[test]
    fn test_model_kind_precedence() {
        assert_eq!(Model::new("a").kind(), ModelKind::Regular);
        assert_eq!(Model::new("a").transient().kind(), ModelKind::Transient);
        assert_eq!(
            Model::new("a").transient().abstract_model().kind(),
            ModelKind::Abstract
        );
    }

    #[test]
    fn test_table_name() {
        assert_eq!(Model::new("sale.order").table(), "sale_order");
        let custom = Model::new("sale.order").with_options(ModelOptions {
            table: Some("so".to_string()),
            ..ModelOptions::default()
        });
        assert_eq!(custom.table(), "so");
    }

    #[test]
    fn test_field_ownership_defaults_to_model() {
        let model = Model::new("a.b").with_module("a");
        let implicit = Field::new("x", FieldType::Integer);
        let explicit = Field::new("y", FieldType::Integer).with_module("c");
        assert!(implicit.declared_by("a", &model));
        assert!(!explicit.declared_by("a", &model));
        assert!(explicit.declared_by("c", &model));
    }

    #[test]
    fn test_json_field_features_flattened() {
        let snapshot = Snapshot::from_json(
            r#"{ "models": [ { "name": "a.b", "modules": ["a"],
                 "fields": [ { "name": "x", "type": "integer", "required": true },
                             { "name": "p", "type": "many2one", "relation": "res.partner",
                               "on_delete": "set null" } ] } ] }"#,
        )
        .unwrap();
        let model = &snapshot.models[0];
        assert!(model.fields[0].features.required);
        assert_eq!(model.fields[1].kind(), FieldKind::Many2one);
        assert_eq!(model.fields[1].on_delete, Some(OnDelete::SetNull));
    }

    #[test]
    fn test_json_on_delete_other_policies() {
        let snapshot = Snapshot::from_json(
            r#"{ "models": [ { "name": "a.b", "modules": ["a"],
                 "fields": [ { "name": "p", "type": "many2one", "relation": "res.partner",
                               "on_delete": "set default" },
                             { "name": "q", "type": "many2one", "relation": "res.partner",
                               "on_delete": "no action" } ] } ] }"#,
        )
        .unwrap();
        let fields = &snapshot.models[0].fields;
        assert_eq!(fields[0].on_delete, Some(OnDelete::SetDefault));
        assert_eq!(fields[1].on_delete, Some(OnDelete::Other));
        assert!(!fields[0].on_delete.unwrap().is_owning());
        assert!(!fields[1].on_delete.unwrap().is_owning());
    }

    #[test]
    fn test_module_state_serde() {
        let module: Module =
            serde_json::from_str(r#"{ "name": "x", "state": "to upgrade" }"#).unwrap();
        assert_eq!(module.state, ModuleState::ToUpgrade);
        assert_eq!(module.state.to_string(), "to upgrade");
        assert_eq!(Module::new("y").state, ModuleState::Installed);
    }

    #[test]
    fn test_framework_methods_per_kind() {
        let methods = FrameworkMethods::default();
        assert!(methods.for_kind(ModelKind::Regular).contains(&"create".to_string()));
        assert!(methods
            .for_kind(ModelKind::Transient)
            .contains(&"_transient_vacuum".to_string()));
        assert!(!methods
            .for_kind(ModelKind::Abstract)
            .contains(&"_transient_vacuum".to_string()));
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let snapshot = snapshot();
        let json = snapshot.to_json().unwrap();
        assert_eq!(Snapshot::from_json(&json).unwrap(), snapshot);
    }
}
