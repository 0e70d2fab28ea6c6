// src/tags/keywords.rs
// Keyword groups -> catalog tag. A group matches when any of its keywords
// occurs as a substring of the lowercased "title description" text.

pub(super) const KEYWORD_TAGS: &[(&[&str], &str)] = &[
    // Loading & progress
    (&["loading", "progress", "loader"], "loading"),
    (&["indicator"], "indicator"),
    (&["progressbar", "progress bar"], "progress"),
    (&["shimmer"], "shimmer"),
    // Navigation
    (&["navigation", "navbar", "nav"], "navigation"),
    (&["menu", "drawer", "reside"], "menu"),
    (&["tab", "tablayout"], "tab"),
    (&["bottomsheet", "bottom sheet"], "bottomsheet"),
    // Animation & effects
    (&["animation", "animated", "animate", "anim"], "animation"),
    (&["transition"], "transition"),
    (&["blur", "blurview"], "blur"),
    (&["shadow"], "shadow"),
    (&["wave"], "wave"),
    (&["explod", "explosion"], "explosion"),
    // Input & selection
    (&["calendar", "date", "datepicker"], "calendar"),
    (&["picker", "select", "choose"], "picker"),
    (&["switch", "toggle"], "switch"),
    (&["slider", "seekbar", "seek"], "slider"),
    (&["rating", "ratingbar"], "rating"),
    // Display
    (&["card", "cardview"], "card"),
    (&["list", "listview", "recycler"], "list"),
    (&["chart", "graph"], "chart"),
    (&["image", "photo", "gallery"], "image"),
    (&["text", "textview", "label"], "text"),
    (&["table"], "table"),
    // Interaction
    (&["swipe", "slide", "sliding", "slidr"], "swipe"),
    (&["drag", "draggable"], "drag"),
    (&["pull", "refresh", "ptr"], "refresh"),
    (&["scroll"], "scroll"),
    (&["expand", "collapse", "fold"], "expand"),
    // Dialogs & overlays
    (&["dialog", "alert", "popup"], "dialog"),
    (&["toast", "snackbar"], "toast"),
    (&["floating", "fab"], "floating"),
    (&["bubble"], "bubble"),
    // Others
    (&["material"], "material"),
    (&["button", "btn"], "button"),
    (&["badge"], "badge"),
    (&["chip"], "chip"),
    (&["stepper"], "stepper"),
    (&["intro", "onboarding", "showcase"], "intro"),
    (&["permission"], "permission"),
    (&["camera", "video"], "media"),
    (&["music", "audio", "player"], "audio"),
    (&["qr", "barcode"], "scanner"),
    (&["ribbon"], "ribbon"),
    (&["ticket"], "ticket"),
    (&["compass"], "compass"),
    (&["tree"], "tree"),
    (&["snowfall", "snow"], "effect"),
    (&["konfetti", "confetti"], "effect"),
    (&["cropper", "crop"], "crop"),
    (&["webview", "web"], "webview"),
];
