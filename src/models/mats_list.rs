use indexmap::IndexSet;
use std::fmt;
use std::str::FromStr;

/// Highest mat number a facility may use
pub const MAX_MAT_NUMBER: i32 = 1000;

/// Ordered, de-duplicated mat numbers parsed from text like `1-10,12,15-20`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatsList {
    mats: IndexSet<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatsListError(String);

impl fmt::Display for MatsListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for MatsListError {}

fn parse_mat(text: &str, list: &str) -> Result<i32, MatsListError> {
    match text.trim().parse::<i32>() {
        Ok(n) if n > 0 && n <= MAX_MAT_NUMBER => Ok(n),
        Ok(n) if n > MAX_MAT_NUMBER => Err(MatsListError(format!(
            "Mat number {} in mats list '{}' exceeds the maximum of {}",
            n, list, MAX_MAT_NUMBER
        ))),
        _ => Err(MatsListError(format!(
            "Invalid mat number '{}' in mats list '{}'",
            text.trim(),
            list
        ))),
    }
}

impl FromStr for MatsList {
    type Err = MatsListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mats = IndexSet::new();
        if s.trim().is_empty() {
            return Ok(Self { mats });
        }
        for item in s.split(',') {
            match item.split_once('-') {
                Some((from, to)) => {
                    let from = parse_mat(from, s)?;
                    let to = parse_mat(to, s)?;
                    if from > to {
                        return Err(MatsListError(format!(
                            "Range '{}' in mats list '{}' is descending",
                            item.trim(),
                            s
                        )));
                    }
                    mats.extend(from..=to);
                }
                None => {
                    mats.insert(parse_mat(item, s)?);
                }
            }
        }
        Ok(Self { mats })
    }
}

impl MatsList {
    pub fn contains(&self, mat: i32) -> bool {
        self.mats.contains(&mat)
    }

    pub fn is_subset(&self, other: &MatsList) -> bool {
        self.mats.is_subset(&other.mats)
    }

    pub fn len(&self) -> usize {
        self.mats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.mats.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mats(s: &str) -> Vec<i32> {
        s.parse::<MatsList>().unwrap().iter().collect()
    }

    #[test]
    fn parses_singles_and_ranges_in_order() {
        assert_eq!(mats("1-3, 7 ,9-10"), vec![1, 2, 3, 7, 9, 10]);
        assert_eq!(mats("5"), vec![5]);
        assert!(mats("  ").is_empty());
    }

    #[test]
    fn drops_duplicates_keeping_first_position() {
        assert_eq!(mats("4,1-5"), vec![4, 1, 2, 3, 5]);
    }

    #[test]
    fn rejects_malformed_lists() {
        assert!("1-".parse::<MatsList>().is_err());
        assert!("0".parse::<MatsList>().is_err());
        assert!("3-1".parse::<MatsList>().is_err());
        assert!("a,b".parse::<MatsList>().is_err());
        assert!("1,,2".parse::<MatsList>().is_err());
    }

    #[test]
    fn rejects_mats_above_the_maximum() {
        let err = "1-5000000".parse::<MatsList>().unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum"));
        assert!("1-2000000000".parse::<MatsList>().is_err());
        assert!(format!("{}", MAX_MAT_NUMBER + 1).parse::<MatsList>().is_err());

        let full: MatsList = format!("1-{}", MAX_MAT_NUMBER).parse().unwrap();
        assert_eq!(full.len(), MAX_MAT_NUMBER as usize);
    }

    #[test]
    fn subset_check() {
        let all: MatsList = "1-10".parse().unwrap();
        let some: MatsList = "2,4-6".parse().unwrap();
        let outside: MatsList = "9-11".parse().unwrap();
        assert!(some.is_subset(&all));
        assert!(!outside.is_subset(&all));
        assert!(all.contains(10));
    }
}
