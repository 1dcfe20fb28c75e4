use crate::{
    attr,
    context::SynthContext,
    diagnostic::Diagnostic,
    discover::{Discovery, discover},
    equality::equality_impl,
    error::WeaveError,
    hash::{enum_hash_impl, hash_impl},
    model::TypeDescriptor,
    object::object_impl,
    operator::{rewrite_operators, suppressed_stubs},
    paths::CratePaths,
    sort::base_first,
    trace::{WeavePhase, WeaveTraceEvent, WeaveTraceSink},
    util::mentions_any,
};
use proc_macro2::TokenStream;
use quote::{ToTokens, TokenStreamExt};
use std::collections::BTreeSet;
use syn::{ImplItem, Item, ItemImpl};

///
/// WeaveOptions
///

#[derive(Clone, Debug)]
pub struct WeaveOptions {
    pub paths: CratePaths,

    /// Remove marker attributes from the emitted items.
    pub strip_markers: bool,
}

impl Default for WeaveOptions {
    fn default() -> Self {
        Self {
            paths: CratePaths::new(),
            strip_markers: true,
        }
    }
}

///
/// WovenType
///
/// What a successful pass produced for one type.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WovenType {
    pub ident: String,
    pub members: Vec<&'static str>,
}

///
/// WeaveOutput
///

#[derive(Debug)]
pub struct WeaveOutput {
    /// The input items with markers stripped and operator stubs rewritten.
    pub items: Vec<Item>,

    /// Generated impls, one stream per impl.
    pub generated: Vec<TokenStream>,

    /// Woven types in processing order.
    pub woven: Vec<WovenType>,

    pub warnings: Vec<Diagnostic>,
}

impl ToTokens for WeaveOutput {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.append_all(&self.items);
        tokens.extend(self.generated.iter().cloned());
    }
}

///
/// Weaver
///
/// Runs one pass over an item set: discover, sort base-first, then
/// synthesize every type, aborting at the first type that fails.
///

#[derive(Default)]
pub struct Weaver<'a> {
    options: WeaveOptions,
    sink: Option<&'a dyn WeaveTraceSink>,
}

impl<'a> Weaver<'a> {
    #[must_use]
    pub fn new(options: WeaveOptions) -> Self {
        Self {
            options,
            sink: None,
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: &'a dyn WeaveTraceSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn weave(&self, mut items: Vec<Item>) -> Result<WeaveOutput, WeaveError> {
        let discovery = discover(&items).map_err(|diags| self.fail(diags))?;
        self.phase(WeavePhase::Discovered, discovery.types.len());

        let order = base_first(&discovery.types).map_err(|diag| self.fail(vec![diag]))?;
        self.phase(WeavePhase::Sorted, order.len());

        self.phase(WeavePhase::Processing, order.len());
        let core = &self.options.paths.core;
        let mut generated = Vec::new();
        let mut woven = Vec::with_capacity(order.len());
        let mut warnings = Vec::new();

        for index in order {
            let ty = &discovery.types[index];
            self.trace(WeaveTraceEvent::TypeStart {
                ident: ty.ident.to_string(),
            });

            let members = self
                .process(ty, &discovery, &mut items, &mut generated, &mut warnings)
                .map_err(|diag| self.fail(vec![diag]))?;

            self.trace(WeaveTraceEvent::TypeFinish {
                ident: ty.ident.to_string(),
                members: members.clone(),
            });
            woven.push(WovenType {
                ident: ty.ident.to_string(),
                members,
            });
        }

        for item in enums_needing_hash(&discovery) {
            generated.push(enum_hash_impl(item, core));
        }

        if self.options.strip_markers {
            strip_all_markers(&mut items);
        }
        for warning in &warnings {
            self.trace(WeaveTraceEvent::diagnostic(warning));
        }
        self.phase(WeavePhase::Done, woven.len());

        Ok(WeaveOutput {
            items,
            generated,
            woven,
            warnings,
        })
    }

    // Synthesize every member one type asks for.
    fn process(
        &self,
        ty: &TypeDescriptor,
        discovery: &Discovery,
        items: &mut [Item],
        generated: &mut Vec<TokenStream>,
        warnings: &mut Vec<Diagnostic>,
    ) -> Result<Vec<&'static str>, Diagnostic> {
        let cx = SynthContext::new(ty, &discovery.ignored, &self.options.paths.core);
        let config = ty.config;
        let mut members = Vec::new();

        if !config.do_not_add_equals {
            generated.push(equality_impl(&cx));
            generated.push(object_impl(&cx));
            members.extend(["StructuralEq", "Object"]);
        }

        if !config.do_not_add_get_hash_code {
            generated.push(hash_impl(&cx));
            members.push("HashCode");
        }

        let stub_indexes = discovery
            .operator_impls
            .get(&ty.ident.to_string())
            .map_or(&[][..], Vec::as_slice);
        let stubs = operator_impls(items, stub_indexes);

        if config.do_not_add_equality_operators {
            let stubs: Vec<&ItemImpl> = stubs.iter().map(|item| &**item).collect();
            warnings.extend(suppressed_stubs(ty, &stubs));
        } else {
            rewrite_operators(ty, stubs, cx.core)?;
            members.push("PartialEq");
        }

        Ok(members)
    }

    fn phase(&self, phase: WeavePhase, types: usize) {
        self.trace(WeaveTraceEvent::Phase { phase, types });
    }

    fn trace(&self, event: WeaveTraceEvent) {
        if let Some(sink) = self.sink {
            sink.on_event(&event);
        }
    }

    // Report the diagnostics, enter `Failed` and build the error.
    fn fail(&self, diags: Vec<Diagnostic>) -> WeaveError {
        for diag in &diags {
            self.trace(WeaveTraceEvent::diagnostic(diag));
        }
        self.phase(WeavePhase::Failed, 0);

        WeaveError::Diagnostics(diags)
    }
}

/// Weave `items` with default options and no tracing.
pub fn weave(items: Vec<Item>) -> Result<WeaveOutput, WeaveError> {
    Weaver::default().weave(items)
}

/// Remove every weaver marker from types, fields, variants and impl methods.
pub fn strip_all_markers(items: &mut [Item]) {
    for item in items {
        match item {
            Item::Struct(item) => {
                attr::strip_markers(&mut item.attrs);
                for field in &mut item.fields {
                    attr::strip_markers(&mut field.attrs);
                }
            }
            Item::Enum(item) => {
                attr::strip_markers(&mut item.attrs);
                for variant in &mut item.variants {
                    attr::strip_markers(&mut variant.attrs);
                }
            }
            Item::Union(item) => {
                attr::strip_markers(&mut item.attrs);
                for field in &mut item.fields.named {
                    attr::strip_markers(&mut field.attrs);
                }
            }
            Item::Impl(item) => {
                for impl_item in &mut item.items {
                    if let ImplItem::Fn(method) = impl_item {
                        attr::strip_markers(&mut method.attrs);
                    }
                }
            }
            _ => {}
        }
    }
}

fn operator_impls<'i>(items: &'i mut [Item], indexes: &[usize]) -> Vec<&'i mut ItemImpl> {
    items
        .iter_mut()
        .enumerate()
        .filter(|(index, _)| indexes.contains(index))
        .filter_map(|(_, item)| match item {
            Item::Impl(item_impl) => Some(item_impl),
            _ => None,
        })
        .collect()
}

// Fieldless enums hashed by some generated impl that have no HashCode yet.
fn enums_needing_hash(discovery: &Discovery) -> Vec<&crate::model::EnumDescriptor> {
    let field_types: Vec<TokenStream> = discovery
        .types
        .iter()
        .filter(|ty| !ty.config.do_not_add_get_hash_code)
        .flat_map(|ty| ty.comparable_fields(&discovery.ignored))
        .map(|field| field.ty.to_token_stream())
        .collect();

    discovery
        .enums
        .iter()
        .filter(|item| !discovery.hash_impls.contains(&item.ident.to_string()))
        .filter(|item| {
            let name = BTreeSet::from([item.ident.to_string()]);
            field_types.iter().any(|ty| mentions_any(ty.clone(), &name))
        })
        .collect()
}

///
/// TESTS
///
