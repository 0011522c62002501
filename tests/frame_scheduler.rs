mod tests {
    use std::collections::VecDeque;
    use std::convert::Infallible;

    use piano_light_composer::midi::{CC_NOTE_MARKER, CC_SUSTAIN};
    use piano_light_composer::{
        CycleError, Duration, EventSource, FrameScheduler, Instant, MessageChannel, MidiMessage,
        OutputDriver, PianoConfig, Rgb,
    };

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Disconnected;

    #[derive(Default)]
    struct ScriptedSource {
        messages: VecDeque<MidiMessage>,
        fail: bool,
    }

    impl ScriptedSource {
        fn strike(&mut self, note: u8) {
            self.messages
                .push_back(MidiMessage::control_change(0, CC_NOTE_MARKER, 0));
            self.messages.push_back(MidiMessage::note_on(0, note, 100));
        }
    }

    impl EventSource for ScriptedSource {
        type Error = Disconnected;

        fn try_receive(&mut self) -> Result<Option<MidiMessage>, Self::Error> {
            if self.fail {
                return Err(Disconnected);
            }
            Ok(self.messages.pop_front())
        }
    }

    #[derive(Default)]
    struct RecordingOutput {
        frames: Vec<Vec<Rgb>>,
        fail: bool,
    }

    impl OutputDriver for RecordingOutput {
        type Error = Disconnected;

        fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(Disconnected);
            }
            self.frames.push(colors.to_vec());
            Ok(())
        }
    }

    type Scheduler = FrameScheduler<ScriptedSource, RecordingOutput, 128, 16>;

    fn scheduler() -> Scheduler {
        Scheduler::new(
            ScriptedSource::default(),
            RecordingOutput::default(),
            &PianoConfig::DEFAULT,
        )
        .unwrap()
    }

    #[test]
    fn test_begin_clears_strip() {
        let mut scheduler = scheduler();
        scheduler.begin().unwrap();
        let frames = &scheduler.output().frames;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), 81);
        assert!(frames[0].iter().all(|pixel| *pixel == Rgb::default()));
    }

    #[test]
    fn test_tick_renders_pending_notes() {
        let mut scheduler = scheduler();
        scheduler.source_mut().strike(60);
        scheduler
            .source_mut()
            .messages
            .push_back(MidiMessage::control_change(0, CC_SUSTAIN, 127));

        let result = scheduler.tick(Instant::from_millis(0)).unwrap();
        assert_eq!(result.events, 2);
        assert_eq!(scheduler.renderer().pedal(), 127);

        let frame = scheduler.output().frames.last().unwrap();
        assert!(frame[36].g > 0);
        assert_eq!(frame, scheduler.frame());
    }

    #[test]
    fn test_tick_timing() {
        let mut scheduler = scheduler();

        let result = scheduler.tick(Instant::from_millis(0)).unwrap();
        assert_eq!(result.next_deadline, Instant::from_millis(50));
        assert_eq!(result.sleep_duration, Duration::from_millis(50));

        let result = scheduler.tick(Instant::from_millis(60)).unwrap();
        assert_eq!(result.next_deadline, Instant::from_millis(100));
        assert_eq!(result.sleep_duration, Duration::from_millis(40));

        // A long stall skips the backlog
        let result = scheduler.tick(Instant::from_millis(1000)).unwrap();
        assert_eq!(result.next_deadline, Instant::from_millis(1050));
        assert_eq!(result.sleep_duration, Duration::from_millis(50));
    }

    #[test]
    fn test_batch_overflow_is_deferred() {
        let mut scheduler = FrameScheduler::<ScriptedSource, RecordingOutput, 128, 2>::new(
            ScriptedSource::default(),
            RecordingOutput::default(),
            &PianoConfig::DEFAULT,
        )
        .unwrap();
        scheduler.source_mut().strike(60);
        scheduler.source_mut().strike(62);
        scheduler.source_mut().strike(64);

        assert_eq!(scheduler.tick(Instant::from_millis(0)).unwrap().events, 2);
        assert_eq!(scheduler.tick(Instant::from_millis(50)).unwrap().events, 1);
        assert_eq!(scheduler.tick(Instant::from_millis(100)).unwrap().events, 0);
        assert_eq!(scheduler.renderer().notes().level(64 - 21), 253);
    }

    #[test]
    fn test_marker_carries_over_to_next_cycle() {
        let mut scheduler = scheduler();
        scheduler
            .source_mut()
            .messages
            .push_back(MidiMessage::control_change(0, CC_NOTE_MARKER, 0));
        assert_eq!(scheduler.tick(Instant::from_millis(0)).unwrap().events, 0);

        scheduler
            .source_mut()
            .messages
            .push_back(MidiMessage::note_on(0, 60, 100));
        assert_eq!(scheduler.tick(Instant::from_millis(50)).unwrap().events, 1);
        assert_eq!(scheduler.renderer().notes().level(60 - 21), 254);
    }

    #[test]
    fn test_source_failure_is_fatal() {
        let mut scheduler = scheduler();
        scheduler.source_mut().fail = true;
        assert_eq!(
            scheduler.tick(Instant::from_millis(0)).unwrap_err(),
            CycleError::Source(Disconnected)
        );
        assert!(scheduler.output().frames.is_empty());
    }

    #[test]
    fn test_output_failure_is_fatal() {
        let mut output = RecordingOutput::default();
        output.fail = true;
        let mut scheduler =
            Scheduler::new(ScriptedSource::default(), output, &PianoConfig::DEFAULT).unwrap();
        assert_eq!(
            scheduler.tick(Instant::from_millis(0)).unwrap_err(),
            CycleError::Output(Disconnected)
        );
    }

    struct NullOutput;

    impl OutputDriver for NullOutput {
        type Error = Infallible;

        fn write(&mut self, _colors: &[Rgb]) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    static MIDI_CHANNEL: MessageChannel<32> = MessageChannel::new();

    #[test]
    fn test_channel_hand_off() {
        let sender = MIDI_CHANNEL.sender();
        let mut scheduler = FrameScheduler::<_, NullOutput, 128, 16>::new(
            MIDI_CHANNEL.receiver(),
            NullOutput,
            &PianoConfig::DEFAULT,
        )
        .unwrap();

        sender.try_send_bytes(&[0xB0, 88, 0]).unwrap();
        sender.try_send_bytes(&[0x90, 21, 80]).unwrap();
        let result = scheduler.tick(Instant::from_millis(0)).unwrap();
        assert_eq!(result.events, 1);
        assert_eq!(scheduler.renderer().notes().level(0), 254);
        assert!(MIDI_CHANNEL.is_empty());
    }
}
