mod tests {
    use myrtio_light_node::channel::{
        COMMAND_QUEUE_SIZE, Channel, CommandQueue, TryReceiveError, TrySendError,
    };
    use myrtio_light_node::protocol::COMMAND_IDLE;

    #[test]
    fn test_usable_capacity_is_one_less_than_size() {
        let queue = CommandQueue::new();
        assert_eq!(queue.capacity(), COMMAND_QUEUE_SIZE - 1);

        for byte in 1..=20u8 {
            queue.enqueue(byte);
        }
        assert_eq!(queue.len(), 15);
    }

    #[test]
    fn test_full_queue_drops_newest() {
        let queue = CommandQueue::new();
        for byte in 1..=16u8 {
            queue.enqueue(byte);
        }

        for expected in 1..=15u8 {
            assert_eq!(queue.dequeue(), expected);
        }
        assert_eq!(queue.dequeue(), COMMAND_IDLE);
    }

    #[test]
    fn test_try_send_reports_full() {
        let queue: Channel<u8, 4> = Channel::new();
        assert_eq!(queue.try_send(1), Ok(()));
        assert_eq!(queue.try_send(2), Ok(()));
        assert_eq!(queue.try_send(3), Ok(()));
        assert_eq!(queue.try_send(4), Err(TrySendError(4)));
    }

    #[test]
    fn test_empty_queue_yields_idle() {
        let queue = CommandQueue::new();
        assert_eq!(queue.is_empty(), true);
        assert_eq!(queue.dequeue(), COMMAND_IDLE);
        assert_eq!(queue.try_receive(), Err(TryReceiveError));
    }

    #[test]
    fn test_fifo_through_handles() {
        let queue = CommandQueue::new();
        let sender = queue.sender();
        let receiver = queue.receiver();

        sender.try_send(0x03).unwrap();
        sender.try_send(0x25).unwrap();
        queue.enqueue(0x12);

        assert_eq!(receiver.try_receive(), Ok(0x03));
        assert_eq!(queue.dequeue(), 0x25);
        assert_eq!(receiver.try_receive(), Ok(0x12));
        assert_eq!(queue.is_empty(), true);
    }

    #[test]
    fn test_wraps_around_ring() {
        let queue = CommandQueue::new();
        for round in 0..5u8 {
            for i in 0..10u8 {
                queue.enqueue(round * 10 + i + 1);
            }
            for i in 0..10u8 {
                assert_eq!(queue.dequeue(), round * 10 + i + 1);
            }
        }
    }
}
