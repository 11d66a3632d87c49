use crate::dataset::Dataset;
use crate::record::Record;

const WEATHER: &[[&str; 5]] = &[
    ["Sunny", "Hot", "High", "False", "No"],
    ["Sunny", "Hot", "High", "True", "No"],
    ["Overcast", "Hot", "High", "False", "Yes"],
    ["Rainy", "Mild", "High", "False", "Yes"],
    ["Rainy", "Cool", "Normal", "False", "Yes"],
    ["Rainy", "Cool", "Normal", "True", "No"],
    ["Overcast", "Cool", "Normal", "True", "Yes"],
    ["Sunny", "Mild", "High", "False", "No"],
    ["Sunny", "Cool", "Normal", "False", "Yes"],
    ["Rainy", "Mild", "Normal", "False", "Yes"],
    ["Sunny", "Mild", "Normal", "True", "Yes"],
    ["Overcast", "Mild", "High", "True", "Yes"],
    ["Overcast", "Hot", "Normal", "False", "Yes"],
    ["Rainy", "Mild", "High", "True", "No"],
];

/// The classic 14-row "play tennis" dataset.
pub fn weather() -> Dataset {
    Dataset::new(
        ["Outlook", "Temperature", "Humidity", "Windy", "Play"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        WEATHER.iter().map(|row| Record::new(row.iter().copied())).collect(),
        None,
    )
    .unwrap()
}

/// Two classes of sizes 6 and 4 over one feature column.
pub fn six_and_four() -> Dataset {
    let records = (0..10)
        .map(|i| {
            let class = if i < 6 { "a" } else { "b" };
            Record::new(vec![i.to_string(), class.to_owned()])
        })
        .collect();
    Dataset::new(vec!["id".to_owned(), "class".to_owned()], records, None).unwrap()
}
