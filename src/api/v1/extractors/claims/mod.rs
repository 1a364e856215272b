/*!
 * Claims extractor
 *
 * Responsibility:
 * - gate が request extensions (Locals) に格納した claims を handler に提供する
 * - どの key から読むかは AppState (= GateConfig.context_key) で決まる
 */

mod core;

pub use self::core::ClaimsExtractor;
