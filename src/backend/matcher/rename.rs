use std::collections::HashMap;

use crate::backend::models::{Atom, VariableAtom};

/// Copy of `atom` with every variable replaced by a fresh unique one.
/// All occurrences of one variable are replaced by the same fresh variable.
pub fn make_variables_unique(atom: &Atom) -> Atom {
    let mut renamed = HashMap::new();
    rename(atom, &mut renamed)
}

fn rename(atom: &Atom, renamed: &mut HashMap<VariableAtom, VariableAtom>) -> Atom {
    match atom {
        Atom::Variable(v) => Atom::Variable(
            renamed
                .entry(v.clone())
                .or_insert_with(|| v.make_unique())
                .clone(),
        ),
        Atom::Expression(e) => Atom::expr(
            e.children()
                .iter()
                .map(|child| rename(child, renamed))
                .collect::<Vec<_>>(),
        ),
        // Symbols and grounded atoms carry no variables
        _ => atom.clone(),
    }
}
