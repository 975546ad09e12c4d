pub(crate) mod prompt;
pub(crate) mod wizard;

#[cfg(test)]
#[path = "../../tests/unit/authoring/wizard.rs"]
mod tests;
