// Example: diff two snapshots and replay the edit script.
use listsync::diff;

fn main() {
    let old = vec!["inbox", "drafts", "sent", "spam"];
    let new = vec!["inbox", "sent", "archive", "drafts"];

    let script = diff(&old, &new);
    println!("deletions={:?}", script.deletions);
    println!("insertions={:?}", script.insertions);
    println!("moves={:?}", script.moves);
    println!("reloads={:?}", script.reloads);
    println!("replayed={:?}", script.apply(&old));
}
