use crate::{
    diagnostic::{Diagnostic, DiagnosticCode},
    model::TypeDescriptor,
};
use std::collections::{BTreeMap, BTreeSet};

/// Order types so every base precedes the types extending it.
///
/// Kahn's algorithm over the `#[base]` edges that stay inside the batch.
/// Unrelated types keep their declaration order.
pub fn base_first(types: &[TypeDescriptor]) -> Result<Vec<usize>, Diagnostic> {
    let by_name: BTreeMap<String, usize> = types
        .iter()
        .enumerate()
        .map(|(index, ty)| (ty.ident.to_string(), index))
        .collect();

    let mut in_degree = vec![0usize; types.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); types.len()];

    for (index, ty) in types.iter().enumerate() {
        let Some(base) = ty.base_ident().and_then(|ident| by_name.get(&ident.to_string())) else {
            continue;
        };
        in_degree[index] += 1;
        dependents[*base].push(index);
    }

    let mut ready: BTreeSet<usize> = (0..types.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(types.len());

    while let Some(next) = ready.pop_first() {
        order.push(next);
        for &dependent in &dependents[next] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.insert(dependent);
            }
        }
    }

    if order.len() == types.len() {
        return Ok(order);
    }

    let cycle: Vec<&TypeDescriptor> = (0..types.len())
        .filter(|&i| in_degree[i] > 0)
        .map(|i| &types[i])
        .collect();
    let names = cycle
        .iter()
        .map(|ty| format!("'{}'", ty.ident))
        .collect::<Vec<_>>()
        .join(", ");

    Err(Diagnostic::spanned(
        DiagnosticCode::InheritanceCycle,
        &cycle[0].ident,
        format!("#[base] fields form a cycle between {names}; a type cannot extend itself"),
    ))
}

///
/// TESTS
///
