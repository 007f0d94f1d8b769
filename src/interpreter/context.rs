use super::error::{RuntimeError, RuntimeErrorKind};
use crate::string::Ident;
use crate::Integer;

/// Upper bound on the length of a declared array.
pub const MAX_ARRAY_LENGTH: usize = 1 << 20;

/// Name to value bindings that remember the order names were first bound in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings<T> {
    entries: Vec<(Ident, T)>,
}

impl<T> Bindings<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_str() == name)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(key, _)| key.as_str() == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Binds `name`, keeping its original position when it is already bound.
    pub fn insert(&mut self, name: &str, value: T) -> Option<T> {
        match self.get_mut(name) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name.into(), value));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<T> {
        let position = self.entries.iter().position(|(key, _)| key.as_str() == name)?;
        Some(self.entries.remove(position).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ident, &T)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(Ident, T)> {
        self.entries
    }
}

impl<T> Default for Bindings<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable state of a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    variables: Bindings<Integer>,
    arrays: Bindings<Vec<Integer>>,
    outputs: Vec<String>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variables(&self) -> &Bindings<Integer> {
        &self.variables
    }

    pub fn arrays(&self) -> &Bindings<Vec<Integer>> {
        &self.arrays
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn into_parts(self) -> (Bindings<Integer>, Bindings<Vec<Integer>>, Vec<String>) {
        (self.variables, self.arrays, self.outputs)
    }
}

// Variables
impl ExecutionContext {
    pub fn declare_variable(&mut self, name: &str) {
        self.variables.insert(name, 0);
    }

    pub fn variable(&self, name: &str) -> Option<Integer> {
        self.variables.get(name).copied()
    }

    pub fn set_variable(&mut self, name: &str, value: Integer) -> Result<(), RuntimeError> {
        match self.variables.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(RuntimeErrorKind::UndeclaredVariable(name.into()).into()),
        }
    }

    /// Binds `name` whether or not it was declared, returning the old value.
    pub fn bind_variable(&mut self, name: &str, value: Integer) -> Option<Integer> {
        self.variables.insert(name, value)
    }

    pub fn remove_variable(&mut self, name: &str) -> Option<Integer> {
        self.variables.remove(name)
    }
}

// Arrays
impl ExecutionContext {
    pub fn declare_array(&mut self, name: &str, size: Integer) -> Result<(), RuntimeError> {
        if size <= 0 {
            return Err(RuntimeErrorKind::InvalidArraySize(size).into());
        }
        let length = usize::try_from(size)
            .ok()
            .filter(|length| *length <= MAX_ARRAY_LENGTH)
            .ok_or(RuntimeErrorKind::InvalidArraySize(size))?;
        self.arrays.insert(name, vec![0; length]);
        Ok(())
    }

    pub fn array(&self, name: &str) -> Option<&[Integer]> {
        self.arrays.get(name).map(Vec::as_slice)
    }

    /// Reads `name[index]`, failing with `UnknownArray` when the array is absent.
    pub fn array_value(&self, name: &str, index: Integer) -> Result<Integer, RuntimeError> {
        let array = self
            .arrays
            .get(name)
            .ok_or_else(|| RuntimeErrorKind::UnknownArray(name.into()))?;
        let position = checked_index(name, index, array.len())?;
        Ok(array[position])
    }

    pub fn set_array_value(
        &mut self,
        name: &str,
        index: Integer,
        value: Integer,
    ) -> Result<(), RuntimeError> {
        let array = self
            .arrays
            .get_mut(name)
            .ok_or_else(|| RuntimeErrorKind::UndeclaredArray(name.into()))?;
        let position = checked_index(name, index, array.len())?;
        array[position] = value;
        Ok(())
    }

    /// Replaces the contents of an existing array. The length may change.
    pub fn replace_array(&mut self, name: &str, values: Vec<Integer>) -> Result<(), RuntimeError> {
        let array = self
            .arrays
            .get_mut(name)
            .ok_or_else(|| RuntimeErrorKind::UndeclaredArray(name.into()))?;
        *array = values;
        Ok(())
    }
}

// Outputs
impl ExecutionContext {
    pub fn append_output(&mut self, line: impl Into<String>) {
        self.outputs.push(line.into());
    }
}

fn checked_index(name: &str, index: Integer, length: usize) -> Result<usize, RuntimeError> {
    usize::try_from(index)
        .ok()
        .filter(|position| *position < length)
        .ok_or_else(|| {
            RuntimeErrorKind::IndexOutOfBounds {
                name: name.into(),
                index,
            }
            .into()
        })
}
