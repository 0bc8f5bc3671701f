//! Dependency index and alias helpers
//!
//! [`DependencyIndex`] walks the module graph breadth-first from the subject
//! module and records, per visited module, the models it declares. Model
//! ownership questions are then answered nearest-first: the first module in
//! traversal order that declares the model wins.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, span, trace, warn, Level};

use super::{MetadataSource, Model, Module};

/// Diagram-scoped identifier: spaces and dots become underscores, lower-cased
pub fn produce_alias(name: &str) -> String {
    name.replace([' ', '.'], "_").to_lowercase()
}

/// Alias of the node rendering `model` as seen from `module`
pub fn model_alias(module: &str, model: &str) -> String {
    produce_alias(&format!("{}_{}", module, model))
}

/// Read-only ownership index built once per diagram build
#[derive(Debug, Clone)]
pub struct DependencyIndex<'a> {
    subject: &'a Module,
    order: Vec<&'a Module>,
    module_models: HashMap<&'a str, Vec<&'a Model>>,
    alias_index: BTreeMap<String, &'a Model>,
    missing: Vec<String>,
}

impl<'a> DependencyIndex<'a> {
    /// Breadth-first walk from `subject`
    ///
    /// Each level is consumed in declaration order. A module is marked when
    /// first enqueued, so shared dependencies and cycles are indexed once.
    pub fn build<S: MetadataSource>(source: &'a S, subject: &'a Module) -> Self {
        let build_span = span!(Level::DEBUG, "dependency_index", subject = %subject.name);
        let _enter = build_span.enter();

        let mut order = Vec::new();
        let mut module_models = HashMap::new();
        let mut alias_index = BTreeMap::new();
        let mut missing = Vec::new();

        let mut marks: HashSet<&str> = HashSet::new();
        marks.insert(subject.name.as_str());
        let mut current = vec![subject];
        let mut next = Vec::new();

        while !current.is_empty() {
            for module in current.drain(..) {
                let models = source.models_of(&module.name);
                trace!(module = %module.name, models = models.len(), "Indexing module");
                for model in &models {
                    alias_index.insert(model_alias(&module.name, &model.name), *model);
                }
                module_models.insert(module.name.as_str(), models);
                order.push(module);

                for dependency in &module.dependencies {
                    if marks.contains(dependency.as_str()) {
                        continue;
                    }
                    match source.module(dependency) {
                        Some(found) => {
                            marks.insert(found.name.as_str());
                            next.push(found);
                        }
                        None => {
                            if !missing.contains(dependency) {
                                warn!(module = %module.name, dependency = %dependency, "Dependency not found");
                                missing.push(dependency.clone());
                            }
                        }
                    }
                }
            }
            std::mem::swap(&mut current, &mut next);
        }

        debug!(modules = order.len(), aliases = alias_index.len(), "Dependency index built");

        Self {
            subject,
            order,
            module_models,
            alias_index,
            missing,
        }
    }

    pub fn subject(&self) -> &'a Module {
        self.subject
    }

    /// Visited modules in traversal order, subject first
    pub fn modules(&self) -> &[&'a Module] {
        &self.order
    }

    pub fn models_of(&self, module: &str) -> &[&'a Model] {
        self.module_models
            .get(module)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Dependency names that the metadata source does not know
    pub fn missing_dependencies(&self) -> &[String] {
        &self.missing
    }

    pub fn model_by_alias(&self, alias: &str) -> Option<&'a Model> {
        self.alias_index.get(alias).copied()
    }

    fn search_order(&self, near: bool) -> &[&'a Module] {
        if near {
            &self.order
        } else {
            &self.order[1..]
        }
    }

    /// First module and model named `name`; `near = false` skips the subject
    pub fn resolve(&self, name: &str, near: bool) -> Option<(&'a Module, &'a Model)> {
        self.search_order(near).iter().find_map(|module| {
            self.models_of(&module.name)
                .iter()
                .find(|model| model.name == name)
                .map(|model| (*module, *model))
        })
    }

    /// Owning module of `name`, falling back to the subject when unresolved
    pub fn resolve_module(&self, name: &str, near: bool) -> &'a Module {
        self.resolve(name, near)
            .map(|(module, _)| module)
            .unwrap_or(self.subject)
    }

    pub fn resolve_model(&self, name: &str, near: bool) -> Option<&'a Model> {
        self.resolve(name, near).map(|(_, model)| model)
    }
}
