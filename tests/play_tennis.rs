//! End-to-end checks on the PlayTennis table.

use id3_tree::{DecisionTree, Entries, Node, parse_rows};

const PLAY_TENNIS: &str = include_str!("../data/play_tennis.csv");

const OUTLOOK: usize = 0;
const TEMPERATURE: usize = 1;
const HUMIDITY: usize = 2;
const WIND: usize = 3;

fn play_tennis() -> (Vec<String>, Entries) {
    let table = parse_rows(PLAY_TENNIS, ',', true).unwrap();
    (table.attribute_names, table.entries)
}

#[test]
fn overall_entropy() {
    let (_, entries) = play_tennis();
    assert_eq!(entries.len(), 14);
    assert_eq!(entries.class_probabilities(), vec![5.0 / 14.0, 9.0 / 14.0]);
    assert!((entries.entropy().unwrap() - 0.940).abs() < 1e-3);
}

#[test]
fn information_gains() {
    let (_, entries) = play_tennis();
    let expected = [
        (OUTLOOK, 0.247),
        (TEMPERATURE, 0.029),
        (HUMIDITY, 0.152),
        (WIND, 0.048),
    ];
    for (attribute_id, gain) in expected {
        let actual = entries.information_gain(attribute_id).unwrap();
        assert!(
            (actual - gain).abs() < 1e-3,
            "Gain(attr{attribute_id}) = {actual}, expected {gain}"
        );
    }
}

#[test_log::test]
fn outlook_has_highest_gain() {
    let (names, entries) = play_tennis();
    let best = entries.attribute_with_highest_information_gain().unwrap();
    assert_eq!(best, OUTLOOK);
    assert_eq!(names[best], "outlook");
}

#[test]
fn partition_counts_sum_to_total() {
    let (_, entries) = play_tennis();
    for attribute_id in 0..entries.attribute_count() {
        let total: usize = entries
            .all_possible_attribute_values(attribute_id)
            .into_iter()
            .map(|value| entries.count_entries_by_attribute(attribute_id, value))
            .sum();
        assert_eq!(total, entries.len());
    }
}

#[test]
fn outlook_partitions() {
    let (_, entries) = play_tennis();
    assert_eq!(entries.count_entries_by_attribute(OUTLOOK, "sunny"), 5);
    assert_eq!(entries.count_entries_by_attribute(OUTLOOK, "overcast"), 4);
    assert_eq!(entries.count_entries_by_attribute(OUTLOOK, "rain"), 5);
    assert_eq!(entries.attribute_entropy(OUTLOOK, "overcast").unwrap(), 0.0);
    assert!((entries.attribute_entropy(OUTLOOK, "sunny").unwrap() - 0.971).abs() < 1e-3);
    assert!(
        (entries.attribute_average_information_entropy(OUTLOOK).unwrap() - 0.694).abs() < 1e-3
    );
}

#[test_log::test]
fn textbook_tree() {
    let (names, entries) = play_tennis();
    let tree = DecisionTree::build(&entries, &names).unwrap();

    let Node::Split {
        attribute_id,
        branches,
    } = tree.root()
    else {
        panic!("root should split");
    };
    assert_eq!(*attribute_id, OUTLOOK);
    assert!(matches!(&branches["overcast"], Node::Leaf { class } if class == "yes"));
    assert!(matches!(
        &branches["sunny"],
        Node::Split { attribute_id, .. } if *attribute_id == HUMIDITY
    ));
    assert!(matches!(
        &branches["rain"],
        Node::Split { attribute_id, .. } if *attribute_id == WIND
    ));

    for row in entries.rows() {
        let attributes: Vec<&str> = row[1..].iter().map(String::as_str).collect();
        assert_eq!(tree.predict(&attributes), Some(row[0].as_str()));
    }
    assert_eq!(tree.root().leaf_count(), 5);
    assert_eq!(tree.root().depth(), 2);
}
