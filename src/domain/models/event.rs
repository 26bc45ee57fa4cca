use serde_json::Value;
use tui_textarea::Input;

use super::PendingQuery;

pub enum Event {
    QueryResponse(PendingQuery, Value),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLN(),
    KeyboardCTRLO(),
    KeyboardEnter(),
    UIChatNext(),
    UIChatPrevious(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
