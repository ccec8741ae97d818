use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{ContactsError, Result};

/// Anything that can be registered by name
pub trait Named {
    /// Unique name the member is looked up by
    fn name(&self) -> &str;
}

/// Ordered set of observers, unique by identity and by name
///
/// Members are kept in registration order for broadcasts, with a
/// name -> position index for direct lookup. Identity is pointer identity
/// of the shared handle, so two separately constructed members are
/// distinct even when they compare equal.
pub struct Registry<T: Named + ?Sized> {
    /// Label used in log lines and errors (e.g. "Formats")
    label: &'static str,
    members: Vec<Rc<T>>,
    index: HashMap<String, usize>,
}

impl<T: Named + ?Sized> Registry<T> {
    /// Create a new empty registry
    pub fn new(label: &'static str) -> Self {
        Registry {
            label,
            members: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Add a member
    /// Fails if this member, or another member with the same name, is already registered
    pub fn register(&mut self, member: Rc<T>) -> Result<()> {
        let name = member.name().to_string();
        if self.contains(&member) || self.index.contains_key(&name) {
            return Err(ContactsError::Duplicate {
                registry: self.label,
                name,
            });
        }

        log::info!("Registering \"{}\" with \"{}\"", name, self.label);
        self.index.insert(name, self.members.len());
        self.members.push(member);
        Ok(())
    }

    /// Remove a member
    pub fn unregister(&mut self, member: &Rc<T>) -> Result<()> {
        let position = self
            .position(member)
            .ok_or_else(|| ContactsError::NotFound {
                registry: self.label,
                name: member.name().to_string(),
            })?;

        log::info!("Unregistering \"{}\" from \"{}\"", member.name(), self.label);
        self.members.remove(position);
        self.rebuild_index();
        Ok(())
    }

    /// Check membership by identity
    pub fn contains(&self, member: &Rc<T>) -> bool {
        self.position(member).is_some()
    }

    /// Look up a member by name
    pub fn get(&self, name: &str) -> Option<&Rc<T>> {
        self.index.get(name).map(|&i| &self.members[i])
    }

    /// Copy of the member list in registration order
    /// Broadcasts iterate this so members may be added or removed meanwhile
    pub fn snapshot(&self) -> Vec<Rc<T>> {
        self.members.clone()
    }

    /// Member names in registration order
    pub fn names(&self) -> Vec<String> {
        self.members.iter().map(|m| m.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn position(&self, member: &Rc<T>) -> Option<usize> {
        self.members.iter().position(|m| Rc::ptr_eq(m, member))
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .members
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name().to_string(), i))
            .collect();
    }
}
