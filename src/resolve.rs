//! Enum symbol resolution.
//!
//! One pass over the full declaration set, before any field is processed,
//! collects every file-level enum under its fully-qualified
//! `.<package>.<EnumName>` key. The table is a plain value handed by
//! reference to whichever pass needs lookups; it is never written after
//! construction, so shared reads are safe without locking.

use indexmap::IndexMap;

use crate::descriptor::{EnumDescriptor, FileDescriptor};

#[derive(Debug, Default)]
pub struct EnumTable {
    by_name: IndexMap<String, EnumDescriptor>,
}

impl EnumTable {
    /// Scan every file exactly once. On a name collision the later file
    /// wins; well-formed descriptor sets do not collide.
    pub fn build(files: &[FileDescriptor]) -> Self {
        let mut by_name = IndexMap::new();
        for file in files {
            for enum_ in &file.enum_type {
                let name = format!(".{}.{}", file.package, enum_.name);
                by_name.insert(name, enum_.clone());
            }
        }
        EnumTable { by_name }
    }

    pub fn lookup(&self, type_name: &str) -> Option<&EnumDescriptor> {
        self.by_name.get(type_name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnumDescriptor)> {
        self.by_name.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::EnumDescriptor;

    fn file(package: &str, enums: Vec<EnumDescriptor>) -> FileDescriptor {
        FileDescriptor {
            name: Some(format!("{package}.proto")),
            package: package.to_string(),
            enum_type: enums,
            ..FileDescriptor::default()
        }
    }

    #[test]
    fn enums_are_keyed_by_qualified_name() {
        let files = vec![
            file("acme.core", vec![EnumDescriptor::with_values("Level", &["LOW", "HIGH"])]),
            file("acme.geo", vec![EnumDescriptor::with_values("Region", &["EU", "US"])]),
        ];
        let table = EnumTable::build(&files);
        assert_eq!(table.len(), 2);
        assert!(table.lookup(".acme.core.Level").is_some());
        assert!(table.lookup(".acme.geo.Region").is_some());
        // Unqualified names never match.
        assert!(table.lookup("Level").is_none());
    }

    #[test]
    fn lookup_preserves_declaration_order_of_values() {
        let files = vec![file(
            "acme",
            vec![EnumDescriptor::with_values("State", &["PENDING", "ACTIVE", "CLOSED"])],
        )];
        let table = EnumTable::build(&files);
        let state = table.lookup(".acme.State").unwrap();
        assert_eq!(
            state.value_names().collect::<Vec<_>>(),
            ["PENDING", "ACTIVE", "CLOSED"]
        );
    }

    #[test]
    fn later_files_win_on_collision() {
        let files = vec![
            file("acme", vec![EnumDescriptor::with_values("Level", &["OLD"])]),
            file("acme", vec![EnumDescriptor::with_values("Level", &["NEW"])]),
        ];
        let table = EnumTable::build(&files);
        let level = table.lookup(".acme.Level").unwrap();
        assert_eq!(level.value_names().collect::<Vec<_>>(), ["NEW"]);
        assert_eq!(table.len(), 1);
    }
}
