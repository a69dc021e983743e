use {
    linked_tuple::{Tuple, Value},
    quickcheck::{Arbitrary, Gen, QuickCheck, TestResult},
};

/// A plain value which can be generated at random and turned into a [`Value`] any number of times.
#[derive(Debug, Clone)]
enum Plain {
    Bool(bool),
    Char(char),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Arbitrary for Plain {
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2, 3, 4]).copied().unwrap_or(0) {
            0 => Plain::Bool(bool::arbitrary(g)),
            1 => Plain::Char(char::arbitrary(g)),
            2 => Plain::Int(i64::arbitrary(g)),
            3 => Plain::Float(f64::arbitrary(g)),
            _ => Plain::Text(String::arbitrary(g)),
        }
    }
}

impl From<&Plain> for Value {
    fn from(plain: &Plain) -> Self {
        match plain {
            Plain::Bool(b) => Value::from(*b),
            Plain::Char(c) => Value::from(*c),
            Plain::Int(i) => Value::from(*i),
            Plain::Float(x) => Value::from(*x),
            Plain::Text(s) => Value::from(s.as_str()),
        }
    }
}

fn values(plains: &[Plain]) -> Vec<Value> {
    plains.iter().map(Value::from).collect()
}

fn get_matches_sequence(plains: Vec<Plain>) -> TestResult {
    if plains.is_empty() {
        return TestResult::discard();
    }
    let tuple = match Tuple::from_values(values(&plains)) {
        Ok(tuple) => tuple,
        Err(error) => return TestResult::error(error.to_string()),
    };
    let expected = values(&plains);
    let all_match = expected
        .iter()
        .enumerate()
        .all(|(i, value)| matches!(tuple.get(i), Ok(Some(got)) if got == value));
    TestResult::from_bool(
        all_match && tuple.size() == plains.len() && tuple.get(plains.len()).is_err(),
    )
}

fn append_concatenates(plains: Vec<Plain>, a: Plain, b: Plain) -> TestResult {
    if plains.is_empty() {
        return TestResult::discard();
    }
    let mut tuple = match Tuple::from_values(values(&plains)) {
        Ok(tuple) => tuple,
        Err(error) => return TestResult::error(error.to_string()),
    };
    if let Err(error) = tuple.ap(&a).and_then(|tuple| tuple.ap(&b)) {
        return TestResult::error(error.to_string());
    }
    let mut expected = values(&plains);
    expected.push(Value::from(&a));
    expected.push(Value::from(&b));
    TestResult::from_bool(tuple.iter().eq(expected.iter().map(Some)) && tuple.last() == expected.last())
}

fn add_then_remove_restores(plains: Vec<Plain>, index: usize, inserted: Plain) -> TestResult {
    if plains.is_empty() {
        return TestResult::discard();
    }
    let index = index % (plains.len() + 1);
    let mut tuple = match Tuple::from_values(values(&plains)) {
        Ok(tuple) => tuple,
        Err(error) => return TestResult::error(error.to_string()),
    };
    if let Err(error) = tuple.add(index, &inserted) {
        return TestResult::error(error.to_string());
    }
    let grown = tuple.size() == plains.len() + 1;
    let removed = match tuple.remove(index) {
        Ok(removed) => removed,
        Err(error) => return TestResult::error(error.to_string()),
    };
    let expected = values(&plains);
    TestResult::from_bool(
        grown
            && removed == Some(Value::from(&inserted))
            && tuple.iter().eq(expected.iter().map(Some))
            && tuple.last() == expected.last(),
    )
}

fn deep_clone_is_equal(plains: Vec<Plain>) -> TestResult {
    let tuple = match Tuple::from_values(values(&plains)) {
        Ok(tuple) => tuple,
        Err(error) => return TestResult::error(error.to_string()),
    };
    match tuple.deep_clone() {
        Ok(clone) => TestResult::from_bool(
            clone == tuple
                && clone.hash_code() == tuple.hash_code()
                && clone.to_string() == tuple.to_string(),
        ),
        Err(error) => TestResult::error(error.to_string()),
    }
}

#[test]
fn get_returns_each_element_of_the_sequence() {
    QuickCheck::new().quickcheck(get_matches_sequence as fn(_) -> TestResult)
}

#[test]
fn append_adds_to_the_end() {
    QuickCheck::new().quickcheck(append_concatenates as fn(_, _, _) -> TestResult)
}

#[test]
fn remove_undoes_add() {
    QuickCheck::new().quickcheck(add_then_remove_restores as fn(_, _, _) -> TestResult)
}

#[test]
fn deep_clone_of_plain_values_is_equal() {
    QuickCheck::new()
        .gen(Gen::new(50))
        .quickcheck(deep_clone_is_equal as fn(_) -> TestResult)
}
