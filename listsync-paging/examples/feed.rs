// Example: an infinite feed backed by a fake server, rendered through a list controller.
//
// An adapter would:
// - hand `LoadRequest`s to its network layer and call `complete` when responses arrive
// - forward scroll offset changes to `on_scroll`, and `end_scrolling` when scrolling stops
// - render the trailing indicator according to `footer_state_changed`
use std::collections::VecDeque;

use listsync::{ListController, ListSurface, ReloadOptions};
use listsync_paging::{
    FooterState, LoadError, LoadRequest, OperationToken, Page, PageLoader, Pager, PagerOptions,
    PagingHost, ScrollMetrics, Span,
};

const ROW: u64 = 44;
const PAGE: u32 = 8;
const TOTAL: u32 = 20;

#[derive(Default)]
struct QueueLoader {
    pending: VecDeque<LoadRequest<u32>>,
}

impl PageLoader<u32> for QueueLoader {
    type Error = String;

    fn load(&mut self, request: LoadRequest<u32>) {
        println!("load token={} cursor={:?}", request.token.get(), request.cursor);
        self.pending.push_back(request);
    }

    fn cancel(&mut self, token: OperationToken) {
        self.pending.retain(|r| r.token != token);
    }
}

#[derive(Default)]
struct CountingSurface {
    rows: usize,
}

impl ListSurface for CountingSurface {
    fn is_in_window(&self) -> bool {
        true
    }

    fn reload_data(&mut self) {}

    fn begin_updates(&mut self) {}

    fn delete_items(&mut self, indexes: &[usize]) {
        self.rows = self.rows.saturating_sub(indexes.len());
    }

    fn insert_items(&mut self, indexes: &[usize]) {
        self.rows += indexes.len();
    }

    fn move_item(&mut self, _from: usize, _to: usize) {}

    fn end_updates(&mut self) {}

    fn visible_indexes(&self, out: &mut Vec<usize>) {
        out.clear();
        out.extend(0..self.rows.min(10));
    }

    fn content_extent(&self) -> u64 {
        self.rows as u64 * ROW
    }

    fn viewport_extent(&self) -> u32 {
        440
    }

    fn scroll_to_top(&mut self) {}
}

struct FeedHost {
    list: ListController<u32>,
    surface: CountingSurface,
    footer: bool,
}

impl PagingHost<u32, String> for FeedHost {
    fn reload_view(&mut self, items: &[u32], animated: bool) {
        self.list.set_items(&mut self.surface, items.to_vec(), animated);
        self.list.finish_update(&mut self.surface);
        self.surface.rows = self.list.len();
        println!("render rows={} animated={animated}", self.list.len());
    }

    fn set_footer_visible(&mut self, visible: bool) {
        self.footer = visible;
    }

    fn footer_state_changed(&mut self, state: FooterState) {
        println!("footer -> {state:?}");
    }
}

fn serve(request: &LoadRequest<u32>) -> Result<Page<u32, u32>, LoadError<String>> {
    let start = request.cursor.unwrap_or(0);
    if start == PAGE * 2 && request.token.get() < 4 {
        return Err(LoadError::Failed("connection reset".to_string()));
    }
    let end = (start + PAGE).min(TOTAL);
    let next = (end < TOTAL).then_some(end);
    Ok(Page::new((start..end).collect(), next))
}

fn main() {
    let host = FeedHost {
        list: ListController::new(ReloadOptions::default()),
        surface: CountingSurface::default(),
        footer: false,
    };
    let mut pager: Pager<u32, u32, _, _> = Pager::new(
        PagerOptions::new().with_refresh_control(false).with_footer_inset(ROW as u32),
        QueueLoader::default(),
        host,
        None,
    );

    pager.refresh_from_beginning(false);

    // Scroll to the bottom after every response, like a user flinging through the feed.
    for _ in 0..10 {
        let Some(request) = pager.loader_mut().pending.pop_front() else {
            if pager.footer_state() == FooterState::Failed {
                println!("retrying");
                pager.retry();
                continue;
            }
            break;
        };
        pager.complete(request.token, serve(&request));

        let content = pager.host().surface.content_extent();
        pager.end_scrolling();
        pager.on_scroll(ScrollMetrics {
            offset: content.saturating_sub(440),
            viewport: 440,
            content,
            footer: Span::new(content, ROW as u32),
            ..ScrollMetrics::default()
        });
    }

    println!(
        "done: items={} footer_attached={}",
        pager.items().len(),
        pager.host().footer
    );
}
