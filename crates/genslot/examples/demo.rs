//! End-to-end walkthrough: push, find, free, and the two iteration styles.
//!
//! Reproduces the "Roel / de / de / Jong" scenario: four strings go in, the
//! second "de " is looked up and freed, and dense iteration still shows its
//! old slot (now dead) while filtered iteration skips it.

use genslot::skipfield::RunLengthSkipField;
use genslot::Slotmap;

type NameMap = Slotmap<&'static str, u32, 32, 16, RunLengthSkipField>;

fn main() {
    let mut names: NameMap = NameMap::new(10);

    let h1 = names.push("Roel ").unwrap();
    let h2 = names.push("de ").unwrap();
    let h3 = names.push("de ").unwrap();
    let h4 = names.push("Jong").unwrap();

    println!("found via h2: {:?}", names.find(h2));
    assert_eq!(names.find(h2), Some(&"de "));

    println!("freeing h2: {}", names.free(h2));
    println!("freeing h2 again: {}", names.free(h2));
    assert!(!names.free(h2));

    let dense: Vec<_> = names.iter().map(|(_, v)| *v).collect();
    println!("dense iteration (includes the now-dead slot): {dense:?}");
    assert_eq!(dense, vec!["Roel ", "de ", "de ", "Jong"]);

    let live: Vec<_> = names.iter_live().map(|(_, v)| *v).collect();
    println!("filtered iteration (skip field jumps over the dead slot): {live:?}");
    assert_eq!(live, vec!["Roel ", "de ", "Jong"]);

    println!("size = {}, capacity = {}", names.len(), names.capacity());
    assert_eq!(names.len(), 3);
    assert!(names.capacity() >= 10);

    for h in [h1, h3, h4] {
        assert!(names.find(h).is_some());
    }
}
