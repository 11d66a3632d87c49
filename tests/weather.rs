use id3::evaluate::evaluate;
use id3::{
    best_tree_search, loader, persist, train, BuildOptions, Dataset, Edge, Node, Record,
    SearchOptions, SplitOptions,
};

fn weather() -> Dataset {
    let contents = include_str!("data/weather.csv");
    loader::parse_delimited(contents, ',', true, Some("Play")).unwrap()
}

#[test]
fn root_split_is_outlook_with_pure_overcast_leaf() {
    let data = weather();
    let tree = train(&data.view(), &BuildOptions::default()).unwrap();
    match tree.root() {
        Node::Branch(root) => {
            assert_eq!(tree.attribute_name(root.attribute), "Outlook");
            assert_eq!(root.edges.get("Overcast"), Some(&Edge::Leaf("Yes".to_owned())));
        }
        Node::Leaf { .. } => panic!("root should split"),
    }
}

#[test]
fn unseen_value_classifies_to_training_majority() {
    let data = weather();
    let tree = train(&data.view(), &BuildOptions::default()).unwrap();
    let row = Record::new(vec!["Hail", "Hot", "High", "False", "?"]);
    assert_eq!(tree.classify(&row), "Yes");
    assert_eq!(tree.classify(&row), tree.default_class());
}

#[test]
fn held_out_search_reports_consistent_results() {
    let data = weather();
    let options = SearchOptions {
        runs: 5,
        seed: 3,
        split: SplitOptions {
            training_fraction: Some(0.5),
            ..SplitOptions::default()
        },
        ..SearchOptions::default()
    };
    let report = best_tree_search(&data, &options).unwrap();
    assert_eq!(report.trials.len() + report.failed, 5);
    let best = report.best.expect("a tree is retained under the accuracy rule");
    for trial in &report.trials {
        // 4 Yes + 2 No train, the remaining 8 rows test
        assert_eq!(trial.evaluation.total, 8);
        assert!(trial.evaluation.accuracy() <= best.accuracy);
    }
    let average = report.average_accuracy.unwrap();
    assert!(average <= best.accuracy && average >= 0.0);
}

#[test]
fn saved_tree_reloads_and_scores_the_same() {
    let data = weather();
    let tree = train(&data.view(), &BuildOptions::default()).unwrap();
    let mut buffer = Vec::new();
    persist::save(&tree, &mut buffer).unwrap();
    let loaded = persist::load(buffer.as_slice()).unwrap();
    let rows = data.view();
    assert_eq!(
        evaluate(rows.rows(), &loaded, data.target()).unwrap(),
        evaluate(rows.rows(), &tree, data.target()).unwrap()
    );
}
