//! Named graphs held by one interactive run

use anyhow::bail;
use graph_manager_core::Graph;
use indexmap::IndexMap;

/// Name -> graph table, kept in creation order so graphs can be picked by
/// their position in the listing.
#[derive(Debug, Default)]
pub struct Session {
    graphs: IndexMap<String, Graph>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.graphs.contains_key(name)
    }

    /// Graph names in creation order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.graphs.keys().map(String::as_str)
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Graph> {
        self.graphs.get(name)
    }

    /// Store a graph under a name that is not in use yet
    pub fn insert(&mut self, name: &str, graph: Graph) -> anyhow::Result<()> {
        if self.graphs.contains_key(name) {
            bail!("graph {name} already exists");
        }
        self.graphs.insert(name.to_string(), graph);
        Ok(())
    }

    /// Look up a graph by its 1-based position in [`Session::names`]
    pub fn by_position(&mut self, position: usize) -> Option<(&str, &mut Graph)> {
        let index = position.checked_sub(1)?;
        self.graphs
            .get_index_mut(index)
            .map(|(name, graph)| (name.as_str(), graph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_rejects_taken_name() {
        let mut session = Session::new();
        session.insert("g", Graph::default()).unwrap();

        let err = session.insert("g", Graph::new(true, true)).unwrap_err();

        assert_eq!(err.to_string(), "graph g already exists");
        assert!(!session.get("g").unwrap().is_directed());
    }

    #[test]
    fn test_by_position_is_one_based() {
        let mut session = Session::new();
        session.insert("first", Graph::default()).unwrap();
        session.insert("second", Graph::new(true, false)).unwrap();

        assert!(session.by_position(0).is_none());
        assert!(session.by_position(3).is_none());

        let (name, graph) = session.by_position(2).unwrap();
        assert_eq!(name, "second");
        assert!(graph.is_directed());
        assert_eq!(session.names().collect::<Vec<_>>(), vec!["first", "second"]);
    }
}
