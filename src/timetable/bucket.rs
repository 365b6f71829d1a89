use std::collections::{BTreeSet, HashMap};

use super::types::{CourseIdentity, Observation};

/// Observations grouped by course identity, in first-seen identity order.
#[derive(Debug, Clone, Default)]
pub struct Buckets {
    order: Vec<CourseIdentity>,
    periods: HashMap<CourseIdentity, BTreeSet<u32>>,
}

impl Buckets {
    /// Group observations; repeated periods collapse into one.
    pub fn from_observations(observations: impl IntoIterator<Item = Observation>) -> Self {
        let mut buckets = Buckets::default();
        for obs in observations {
            buckets.insert(obs.identity, obs.period);
        }
        buckets
    }

    pub fn insert(&mut self, identity: CourseIdentity, period: u32) {
        match self.periods.get_mut(&identity) {
            Some(set) => {
                set.insert(period);
            }
            None => {
                self.order.push(identity.clone());
                self.periods.insert(identity, BTreeSet::from([period]));
            }
        }
    }

    /// Number of distinct identities.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Identity and ascending period set, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&CourseIdentity, &BTreeSet<u32>)> {
        self.order
            .iter()
            .filter_map(|id| self.periods.get(id).map(|ps| (id, ps)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::types::Day;

    fn identity(title: &str, day: Day) -> CourseIdentity {
        CourseIdentity {
            term: "T".into(),
            department: "D".into(),
            grade: "1".into(),
            section: "A".into(),
            day,
            title: title.into(),
            room: "301".into(),
            instructor: "Kim".into(),
        }
    }

    fn obs(title: &str, day: Day, period: u32) -> Observation {
        Observation {
            identity: identity(title, day),
            period,
        }
    }

    #[test]
    fn duplicate_periods_collapse() {
        let buckets = Buckets::from_observations(vec![
            obs("Algo", Day::Mon, 3),
            obs("Algo", Day::Mon, 2),
            obs("Algo", Day::Mon, 3),
            obs("Algo", Day::Mon, 4),
            obs("Algo", Day::Mon, 2),
        ]);
        assert_eq!(buckets.len(), 1);
        let (_, ps) = buckets.iter().next().unwrap();
        assert_eq!(ps.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn identities_keep_first_seen_order() {
        let buckets = Buckets::from_observations(vec![
            obs("Networks", Day::Tue, 1),
            obs("Algo", Day::Mon, 1),
            obs("Networks", Day::Tue, 2),
            obs("Algo", Day::Tue, 5),
        ]);
        let order: Vec<_> = buckets
            .iter()
            .map(|(id, _)| (id.title.as_str(), id.day))
            .collect();
        assert_eq!(
            order,
            vec![("Networks", Day::Tue), ("Algo", Day::Mon), ("Algo", Day::Tue)]
        );
    }

    #[test]
    fn differing_room_splits_buckets() {
        let mut other = obs("Algo", Day::Mon, 2);
        other.identity.room = "402".into();
        let buckets = Buckets::from_observations(vec![obs("Algo", Day::Mon, 1), other]);
        assert_eq!(buckets.len(), 2);
    }
}
