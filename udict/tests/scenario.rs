use assert_matches::assert_matches;
use indexmap::indexmap;
use pretty_assertions::assert_eq;
use ufpy_udict::{ArithError, Error, KeySelector, Selection, UDict};

fn xyz() -> UDict<&'static str, i64> {
    UDict::from_map(indexmap! { "x" => 1, "y" => 2, "z" => 3 })
}

#[test]
fn xyz_walkthrough() {
    let _ = env_logger::try_init();

    let c = xyz();
    assert_eq!(c.get(&KeySelector::Position(2)), Ok(Selection::One(&2)));

    let reversed = c.reversed();
    assert_eq!(
        reversed.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
        vec![("z", 3), ("y", 2), ("x", 1)]
    );
    assert_eq!(reversed.to_string(), r#"u{"z": 3, "y": 2, "x": 1}"#);

    let sum = &c + &indexmap! { "y" => 99 };
    assert_eq!(sum.get(&KeySelector::Key("y")), Ok(Selection::One(&99)));
    assert_eq!(sum.get(&KeySelector::Key("x")), Ok(Selection::One(&1)));

    // Nothing above touched `c`.
    assert_eq!(c.to_string(), r#"u{"x": 1, "y": 2, "z": 3}"#);
}

#[test]
fn defaults() {
    let _ = env_logger::try_init();

    let mut dict = UDict::builder()
        .pairs([("a", 1), ("b", 2)])
        .default_value(-1)
        .build()
        .unwrap();

    assert_eq!(
        dict.get(&KeySelector::Key("c")).map(Selection::cloned),
        Ok(Selection::One(-1))
    );

    dict.set_entries(indexmap! { "c" => 3 });
    assert_eq!(dict.get(&KeySelector::Key("a")), Ok(Selection::One(&-1)));
    assert_eq!(dict.get(&KeySelector::Key("c")), Ok(Selection::One(&3)));

    dict.set_default_value(None);
    assert_matches!(
        dict.get(&KeySelector::Key("a")),
        Err(Error::MissingKey { .. })
    );
}

#[test]
fn writing_ranges() {
    let _ = env_logger::try_init();

    let mut dict = xyz();
    dict.set(
        KeySelector::range(None, None, -1),
        Selection::Many(vec![30, 20, 10]),
    )
    .unwrap();
    assert_eq!(dict, indexmap! { "x" => 10, "y" => 20, "z" => 30 });

    dict.set((2..).into(), Selection::One(0)).unwrap();
    assert_eq!(
        dict.get(&(..).into()).map(Selection::cloned),
        Ok(Selection::Many(vec![10, 0, 0]))
    );
}

#[test]
fn elementwise_arithmetic() {
    let dict = xyz();
    let weights = UDict::from_pairs([("x", 10), ("z", 100)]);

    let product = dict.checked_mul(&weights).unwrap();
    assert_eq!(product, indexmap! { "x" => 10, "y" => 2, "z" => 300 });

    let back = product.checked_div(&weights).unwrap();
    assert_eq!(back, dict);

    assert_matches!(
        dict.checked_div(&UDict::from_pairs([("y", 0)])),
        Err(Error::Arith {
            source: ArithError::DivisionByZero,
            ..
        })
    );
}

#[test]
fn subtraction_only_removes_matches() {
    let dict = xyz();
    let diff = &dict - &UDict::from_pairs([("x", 1), ("y", 3)]);
    assert_eq!(diff.keys().copied().collect::<Vec<_>>(), vec!["y", "z"]);
}

#[test]
fn serde_round_trip() {
    let dict = xyz().with_default(0);
    let json = serde_json::to_string(&dict).unwrap();
    assert_eq!(json, r#"{"x":1,"y":2,"z":3}"#);

    let back: UDict<String, i64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.keys().cloned().collect::<Vec<_>>(), vec!["x", "y", "z"]);
    assert_eq!(back.default_value(), None);
}
