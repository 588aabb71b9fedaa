// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Source location tracking for parser

use std::fmt;

/// A value with source location information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    /// The value
    pub value: T,
    /// Start byte offset in the input
    pub start: usize,
    /// End byte offset in the input (exclusive)
    pub end: usize,
}

impl<T> Spanned<T> {
    /// Create a new spanned value
    pub fn new(value: T, start: usize, end: usize) -> Self {
        Self { value, start, end }
    }

    /// Get the span length
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Map the value while preserving the span
    pub fn map<U, F>(self, f: F) -> Spanned<U>
    where
        F: FnOnce(T) -> U,
    {
        Spanned {
            value: f(self.value),
            start: self.start,
            end: self.end,
        }
    }
}

/// Source text between two byte offsets, or `""` when out of range
pub fn source_between(input: &str, start: usize, end: usize) -> &str {
    input.get(start..end).unwrap_or("")
}

impl<T: fmt::Display> fmt::Display for Spanned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_helpers() {
        let spanned = Spanned::new("Rev", 3, 6);
        assert_eq!(spanned.len(), 3);
        assert!(!spanned.is_empty());
        assert_eq!(spanned.map(str::len).value, 3);
        assert_eq!(source_between("v2 <= Rev < v5", 0, 9), "v2 <= Rev");
        assert_eq!(source_between("AB", 1, 9), "");
    }
}
