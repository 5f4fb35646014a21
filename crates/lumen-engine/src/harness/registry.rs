use anyhow::Result;

use crate::core::{Context, Example};

use super::HarnessError;

type InitFn<G> = fn(&mut Context<'_, G>) -> Result<Box<dyn Example<G>>>;

fn boot<G, E: Example<G>>(ctx: &mut Context<'_, G>) -> Result<Box<dyn Example<G>>> {
    Ok(Box::new(E::init(ctx)?))
}

/// A named example unit: its name and the constructor that runs its `init`.
pub struct ExampleEntry<G> {
    name: &'static str,
    init: InitFn<G>,
}

impl<G> ExampleEntry<G> {
    pub fn new<E: Example<G>>(name: &'static str) -> Self {
        Self { name, init: boot::<G, E> }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn init_fn(&self) -> InitFn<G> {
        self.init
    }
}

/// Ordered list of example units.
///
/// Built once at startup with [`Registry::with`] and handed to the dispatcher,
/// which never changes it.
pub struct Registry<G> {
    entries: Vec<ExampleEntry<G>>,
}

impl<G> Registry<G> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends an example under `name`.
    pub fn with<E: Example<G>>(mut self, name: &'static str) -> Self {
        self.entries.push(ExampleEntry::new::<E>(name));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ExampleEntry<G>> {
        self.entries.get(index)
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(ExampleEntry::name)
    }

    /// Index of the first example whose name matches exactly.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// Like [`position`](Self::position) but failing with `UnknownExample`.
    pub fn lookup(&self, name: &str) -> Result<usize, HarnessError> {
        self.position(name)
            .ok_or_else(|| HarnessError::UnknownExample(name.to_string()))
    }
}

impl<G> Default for Registry<G> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl Example<()> for Noop {
        fn init(_: &mut Context<'_, ()>) -> Result<Self> {
            Ok(Noop)
        }

        fn draw(&mut self, _: &mut Context<'_, ()>) -> Result<()> {
            Ok(())
        }
    }

    fn registry() -> Registry<()> {
        Registry::new()
            .with::<Noop>("ClearScreen")
            .with::<Noop>("BasicTriangle")
            .with::<Noop>("ClearScreen")
    }

    #[test]
    fn keeps_registration_order() {
        let names: Vec<_> = registry().names().collect();
        assert_eq!(names, ["ClearScreen", "BasicTriangle", "ClearScreen"]);
    }

    #[test]
    fn lookup_returns_first_exact_match() {
        let reg = registry();
        assert_eq!(reg.lookup("ClearScreen"), Ok(0));
        assert_eq!(reg.lookup("BasicTriangle"), Ok(1));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(
            registry().lookup("clearscreen"),
            Err(HarnessError::UnknownExample("clearscreen".into()))
        );
    }
}
