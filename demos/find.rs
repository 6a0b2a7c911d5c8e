// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use regex_seq::{EnumerableSource, Expression, ListSource, Pattern};

pub fn main() {
    characters();
    numbers();
}

fn char_hex() -> Expression<char> {
    Expression::predicate("char_hex", |c: &char| c.is_ascii_hexdigit())
}

fn characters() {
    // '#', char_hex.repeat(6)
    let pattern = Pattern::new(Expression::list(vec![
        Expression::value('#'),
        char_hex().repeat(6),
    ]));
    let source = ListSource::from("The color is #ffbb33 and the background is #bbdd99.");

    println!("Pattern: {}", pattern.get_debug_text());

    // find one
    let m = pattern.find(&source, 0).unwrap();
    if m.success() {
        println!("Found match: {}", m.items().iter().collect::<String>());
    } else {
        println!("No match found");
    }

    // find all
    let matches = pattern.matches(&source, 0).unwrap();
    for m in matches.iter() {
        println!(
            "Found match at {:?}: {}",
            m.range(),
            m.items().iter().collect::<String>()
        );
    }
}

fn numbers() {
    // rising edges: a value followed by a larger one, searched lazily over an iterator
    let readings = [3, 3, 5, 9, 2, 2, 4, 1];
    let pattern = Pattern::new(Expression::list(vec![
        Expression::predicate("low", |n: &i32| *n < 4),
        Expression::predicate("high", |n: &i32| *n >= 4).one_or_more(),
    ]));
    let source = EnumerableSource::from_iterable(readings);

    for m in pattern.find_iter(&source, 0) {
        println!("Rising edge at {:?}: {:?}", m.range(), m.items().to_vec());
    }
}
