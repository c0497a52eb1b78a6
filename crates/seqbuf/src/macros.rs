/// Builds a [`SequenceBuffer`](crate::SequenceBuffer) whose capacity equals
/// the number of elements.
///
/// ```
/// let buf = seqbuf::seqbuf![1, 2, 3];
/// assert_eq!(buf.capacity(), 3);
/// ```
#[macro_export]
macro_rules! seqbuf {
    () => (
        $crate::SequenceBuffer::new()
    );
    ($v:expr; $n:expr) => (
        $crate::SequenceBuffer::from(::std::vec![$v; $n])
    );
    [$($elem:expr),+ $(,)?] => {
        $crate::SequenceBuffer::from([$($elem),+])
    };
}
