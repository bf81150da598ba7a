use dremel::{nested, shred, NestedValue};

fn main() {
    let records: Vec<NestedValue<&str>> = vec![
        nested!([["en-us", "en"], [], ["en-gb"]]),
        nested!(null),
        nested!([[null, "fr"]]),
    ];

    let column = match shred(&records, 5) {
        Ok(column) => column,
        Err(err) => {
            eprintln!("shredding failed: {}", err);
            return;
        }
    };

    println!("Column -> {:?}", column.bounds());
    println!("\trepetitions: {:?}", column.repetitions());
    println!("\tdefinitions: {:?}", column.definitions());
    println!("\tvalues: {:?}", column.values());

    match column.assemble() {
        Ok(assembled) => {
            for (index, record) in assembled.enumerate() {
                println!("\t[{}] {}", index, record);
            }
        }
        Err(err) => eprintln!("assembly failed: {}", err),
    }
}
