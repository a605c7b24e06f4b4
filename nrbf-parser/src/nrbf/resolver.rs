/*!
 Resolution of member references against the object registry.

 Parsing leaves every `MemberReference` record in the tree as a
 [`Value::Reference`] placeholder, because the referenced object may not have been
 read yet. Once the stream is complete the placeholders can be resolved two ways:

 - **Expansion** substitutes a copy of the registered object at every reference
   site, producing a plain tree that any serializer can walk. Two references to the
   same id yield equal subtrees, and a reference cycle is detected and reported.
 - **In place** keeps the placeholders and pairs the root with the registry, so
   consumers that understand graphs can follow each reference to the single
   registered node and shared identity survives.
*/

use std::collections::HashSet;

use crate::{
    error::{decode::DecodeError, resolve::ResolveError},
    nrbf::{
        models::{ClassInstance, Value},
        parser::{self, ParsedStream},
    },
};

/// Parse a payload and resolve its references in one step, returning the value tree
/// rooted at the stream's root id
pub fn decode(stream: &[u8], options: ResolveOptions) -> Result<Value, DecodeError> {
    parser::parse(stream)
        .map_err(DecodeError::Parse)?
        .resolve(options)
        .map_err(DecodeError::Resolve)
}

/// Which output shape [`ParsedStream::resolve`] produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Keep `Reference` nodes; the graph stays shared and possibly cyclic
    InPlace,
    /// Substitute referenced objects at each site, producing a tree
    Expand,
}

/// Options for one resolution pass
#[derive(Debug, Clone, Copy)]
pub struct ResolveOptions {
    pub mode: ResolveMode,
    /// Emit a `Reference` sentinel for unresolvable or cyclic references instead of
    /// failing, for partial inspection of damaged streams
    pub lenient: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            mode: ResolveMode::Expand,
            lenient: false,
        }
    }
}

impl ParsedStream {
    /// Resolve member references and return the value rooted at the stream's root id.
    ///
    /// # Example:
    ///
    /// ```
    /// use nrbf_parser::nrbf::{parser, resolver::ResolveOptions};
    ///
    /// let bytes: Vec<u8> = vec![]; // Example payload
    /// if let Ok(stream) = parser::parse(&bytes) {
    ///     let tree = stream.resolve(ResolveOptions::default());
    /// }
    /// ```
    pub fn resolve(&self, options: ResolveOptions) -> Result<Value, ResolveError> {
        let root_id = self.root_id();
        let root = match self.object(root_id) {
            Some(root) => root,
            None if options.lenient => return Ok(Value::Reference(root_id)),
            None => return Err(ResolveError::UnknownObjectId { id: root_id }),
        };
        match options.mode {
            ResolveMode::InPlace => {
                let mut visited = HashSet::new();
                self.check_references(root, &mut visited, options.lenient)?;
                Ok(root.clone())
            }
            ResolveMode::Expand => {
                let mut visiting = Vec::new();
                self.expand_value(root, &mut visiting, options.lenient)
            }
        }
    }

    /// Walk the graph from a value and verify every reachable reference has a
    /// registered target. The visited set is keyed by object id so shared objects
    /// are checked once and cycles terminate.
    fn check_references(
        &self,
        value: &Value,
        visited: &mut HashSet<i32>,
        lenient: bool,
    ) -> Result<(), ResolveError> {
        match value {
            Value::Reference(id) => {
                if visited.insert(*id) {
                    match self.object(*id) {
                        Some(target) => self.check_references(target, visited, lenient)?,
                        None if lenient => {}
                        None => return Err(ResolveError::UnknownObjectId { id: *id }),
                    }
                }
            }
            Value::Array(values) => {
                for value in values {
                    self.check_references(value, visited, lenient)?;
                }
            }
            Value::Object(instance) => {
                for (_, member) in &instance.members {
                    self.check_references(member, visited, lenient)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Copy a value with every reference replaced by its registered target. The
    /// stack of ids currently being expanded detects cycles.
    fn expand_value(
        &self,
        value: &Value,
        visiting: &mut Vec<i32>,
        lenient: bool,
    ) -> Result<Value, ResolveError> {
        match value {
            Value::Reference(id) => {
                if visiting.contains(id) {
                    if lenient {
                        return Ok(Value::Reference(*id));
                    }
                    return Err(ResolveError::CyclicReference { id: *id });
                }
                match self.object(*id) {
                    Some(target) => {
                        visiting.push(*id);
                        let expanded = self.expand_value(target, visiting, lenient)?;
                        visiting.pop();
                        Ok(expanded)
                    }
                    None if lenient => Ok(Value::Reference(*id)),
                    None => Err(ResolveError::UnknownObjectId { id: *id }),
                }
            }
            Value::Array(values) => {
                let mut expanded = Vec::with_capacity(values.len());
                for value in values {
                    expanded.push(self.expand_value(value, visiting, lenient)?);
                }
                Ok(Value::Array(expanded))
            }
            Value::Object(instance) => {
                let mut members = Vec::with_capacity(instance.members.len());
                for (name, member) in &instance.members {
                    members.push((name.clone(), self.expand_value(member, visiting, lenient)?));
                }
                Ok(Value::Object(ClassInstance {
                    class: instance.class.clone(),
                    library: instance.library.clone(),
                    members,
                }))
            }
            other => Ok(other.clone()),
        }
    }
}
