use futures::{future::poll_fn, task::Poll, Future};
use nb::{Error, Result as NbResult};

/// Turns a non-blocking operation into a future, polling it until it stops
/// reporting [`Error::WouldBlock`].
pub fn nb_async<F, T, E>(mut f: F) -> impl Future<Output = Result<T, E>>
where
    F: FnMut() -> NbResult<T, E>,
{
    poll_fn(move |cx| match f() {
        Ok(val) => Poll::Ready(Ok(val)),
        Err(Error::Other(e)) => Poll::Ready(Err(e)),
        Err(Error::WouldBlock) => {
            // nothing wakes us up on completion, so ask to be polled again
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
}

/// Maps a non-blocking read onto an `Option`, `None` meaning nothing is
/// pending right now.
pub fn nb_poll<T, E>(result: NbResult<T, E>) -> Result<Option<T>, E> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(Error::WouldBlock) => Ok(None),
        Err(Error::Other(e)) => Err(e),
    }
}
