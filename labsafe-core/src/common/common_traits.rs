use crate::common::collections::HashMap;

/// General imports
use anyhow::Result;
use std::sync::Arc;

/// For all records that can be inserted into a HashMap
/// based on their `id` attribute
pub trait IdentifiableTrait {
    /// id of the record
    fn get_id(&self) -> &str;
    /// send the record to a HashMap
    /// only works with concrete types and not traits!
    fn to_map(self, map: &mut HashMap<String, Arc<Self>>) -> Option<Arc<Self>>
    where
        Self: Sized,
    {
        map.insert(self.get_id().to_string(), Arc::new(self))
    }
}

/// For objects built using a T builder object
pub trait BuildableTrait {
    type T;
    /// get the builder for the method
    /// should just be a call to `T::default()`
    fn get_builder() -> Self::T
    where
        Self: Sized;
}

/// For builder objects that build a T object
pub trait BuilderTrait {
    type T;
    /// expected for builder objects even if
    /// there is a default implementation
    fn new() -> Self
    where
        Self: Sized;
    /// build the target object
    fn build(self) -> Result<Self::T>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Record {
        id: String,
    }

    impl IdentifiableTrait for Record {
        fn get_id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn test_to_map_replaces_existing_id() {
        let mut map = HashMap::<String, Arc<Record>>::new();
        assert!(
            Record {
                id: "a".to_string()
            }
            .to_map(&mut map)
            .is_none()
        );
        let previous = Record {
            id: "a".to_string(),
        }
        .to_map(&mut map);
        assert_eq!(previous.unwrap().get_id(), "a");
        assert_eq!(map.len(), 1);
    }
}
