// Example: rows whose payload is not an identity, driven through a list controller.
use listsync::{Keyed, Layer, ListController, ListSurface, ReloadOptions, Update};

#[derive(Default)]
struct PrintSurface {
    rows: usize,
}

impl ListSurface for PrintSurface {
    fn is_in_window(&self) -> bool {
        true
    }

    fn reload_data(&mut self) {
        println!("reload_data");
    }

    fn begin_updates(&mut self) {
        println!("begin_updates");
    }

    fn delete_items(&mut self, indexes: &[usize]) {
        println!("  delete {indexes:?}");
    }

    fn insert_items(&mut self, indexes: &[usize]) {
        println!("  insert {indexes:?}");
    }

    fn move_item(&mut self, from: usize, to: usize) {
        println!("  move {from} -> {to}");
    }

    fn end_updates(&mut self) {
        println!("end_updates");
    }

    fn visible_indexes(&self, out: &mut Vec<usize>) {
        out.clear();
        out.extend(0..self.rows.min(3));
    }

    fn content_extent(&self) -> u64 {
        self.rows as u64 * 44
    }

    fn viewport_extent(&self) -> u32 {
        600
    }

    fn scroll_to_top(&mut self) {
        println!("scroll_to_top");
    }

    fn set_layer(&mut self, index: usize, layer: Layer) {
        println!("  layer {index} {layer:?}");
    }
}

fn main() {
    let mut surface = PrintSurface { rows: 3 };
    let mut list = ListController::with_items(
        ReloadOptions::default(),
        vec![
            Keyed::new(1u64, "Alice"),
            Keyed::new(2, "Bob"),
            Keyed::new(3, "Carol"),
        ],
    );

    let update = list.set_items(
        &mut surface,
        vec![
            Keyed::new(3u64, "Carol"),
            Keyed::new(4, "Dave"),
            Keyed::new(1, "Alice (edited)"),
        ],
        true,
    );
    if let Update::Applied(reload) = update {
        println!("kind={:?} reloads={:?}", reload.kind, reload.reloads);
    }
    list.finish_update(&mut surface);

    let names: Vec<_> = list.items().iter().map(|row| row.value).collect();
    println!("rows={names:?}");
}
