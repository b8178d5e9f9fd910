use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    /// Emails in registration order.
    pub participants: Vec<String>,
}

impl Activity {
    /// Capacity minus roster size. Negative when oversubscribed.
    pub fn spots_left(&self) -> i64 {
        self.max_participants - self.participants.len() as i64
    }
}

#[derive(Deserialize)]
struct ActivityDetails {
    description: String,
    schedule: String,
    max_participants: i64,
    participants: Vec<String>,
}

impl ActivityDetails {
    fn into_activity(self, name: String) -> Activity {
        Activity {
            name,
            description: self.description,
            schedule: self.schedule,
            max_participants: self.max_participants,
            participants: self.participants,
        }
    }
}

/// All activities from one fetch, in the order the server listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityCatalog {
    activities: Vec<Activity>,
}

impl ActivityCatalog {
    pub fn new(activities: Vec<Activity>) -> Self {
        let mut catalog = Self::default();
        for activity in activities {
            catalog.upsert(activity);
        }
        catalog
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Activity> {
        self.activities.iter_mut().find(|a| a.name == name)
    }

    // A repeated name keeps its first position and takes the latest value.
    fn upsert(&mut self, activity: Activity) {
        match self.get_mut(&activity.name) {
            Some(existing) => *existing = activity,
            None => self.activities.push(activity),
        }
    }
}

impl<'de> Deserialize<'de> for ActivityCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = ActivityCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of activity name to activity details")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut catalog = ActivityCatalog {
                    activities: Vec::with_capacity(map.size_hint().unwrap_or(0)),
                };
                while let Some((name, details)) = map.next_entry::<String, ActivityDetails>()? {
                    catalog.upsert(details.into_activity(name));
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
