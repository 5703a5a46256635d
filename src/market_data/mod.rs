// Market data module entrypoint
pub mod adapters;       // venue-specific fetchers (Gemini, Coinbase)
pub mod normaliser;     // wire strings -> exact decimals, skip bad levels
pub mod external_book;  // one venue's normalized snapshot
pub mod unified_book;   // merged, ordered view over all venues
pub mod rate_gate;      // per-source minimum call interval
pub mod router;         // orchestrates everything for one run
