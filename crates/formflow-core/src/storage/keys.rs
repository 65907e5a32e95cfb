//! Storage key derivation.
//!
//! Every entry a component writes is namespaced by its `component_key` so
//! that different multistep components can share one storage backend without
//! colliding. The key formats are stable:
//! - `{component_key}_current_step_name`
//! - `{component_key}_form_values_{step_name}`

/// Key holding the persisted current step name.
pub fn current_step_key(component_key: &str) -> String {
    format!("{component_key}_current_step_name")
}

/// Key holding the persisted form values of one step.
pub fn form_values_key(component_key: &str, step_name: &str) -> String {
    format!("{component_key}_form_values_{step_name}")
}

/// Derives a component key from a Rust type: the last path segment of the
/// type name, snake-cased. `checkout::CheckoutWizard` -> `checkout_wizard`.
pub fn component_key_for<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let last = full.rsplit("::").next().unwrap_or(full);
    snake_case(last)
}

/// ASCII snake-case conversion for type-name segments.
pub fn snake_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_breaks = i > 0
                && chars[i - 1] != '_'
                && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if (prev_breaks || (i > 0 && chars[i - 1] != '_' && next_lower)) && !out.is_empty() {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
