//! ST7796S TFT controller (320x480, 16 bpp over 4-wire SPI)
//!
//! # Bus protocol
//!
//! Every command is one byte sent with D/C low, followed by zero or more
//! parameter bytes with D/C high. Pixels are streamed after `RAMWR` as
//! big-endian RGB565, so the frame region buffer must hold byte-swapped
//! words (`ByteOrder::BigEndian`) and is sent as raw bytes.
//!
//! Window addresses on the wire are inclusive; [`Region`] is exclusive.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiDevice;
use gatewatch_core::config::{ColorOrder, Orientation, PanelConfig};
use gatewatch_core::geometry::{Region, RegionError};
use gatewatch_core::traits::TransferChannel;
use gatewatch_hal::OutputPin;

use super::{madctl, PanelError};

/// ST7796 command set (subset used here)
#[allow(dead_code)]
pub mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVOFF: u8 = 0x20;
    pub const INVON: u8 = 0x21;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
    /// Command set control (extension register unlock)
    pub const CSCON: u8 = 0xF0;
}

/// COLMOD parameter for 16 bits per pixel
const PIXEL_FORMAT_16BPP: u8 = 0x55;

/// ST7796 driver
pub struct St7796<SPI, DC, RST, BL> {
    spi: SPI,
    dc: DC,
    rst: RST,
    bl: BL,
    width: u16,
    height: u16,
    gap_x: u16,
    gap_y: u16,
    madctl: u8,
    backlight_active_high: bool,
    ready: bool,
}

impl<SPI, DC, RST, BL> St7796<SPI, DC, RST, BL>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    /// Create a driver; nothing is sent until [`St7796::init`]
    pub fn new(spi: SPI, dc: DC, rst: RST, bl: BL) -> Self {
        let config = PanelConfig::default();
        Self {
            spi,
            dc,
            rst,
            bl,
            width: config.geometry.width,
            height: config.geometry.height,
            gap_x: 0,
            gap_y: 0,
            madctl: madctl::from_orientation(config.orientation, config.color_order),
            backlight_active_high: config.backlight_active_high,
            ready: false,
        }
    }

    /// Reset and configure the panel, then switch display and backlight on
    pub async fn init<D: DelayNs>(
        &mut self,
        delay: &mut D,
        config: &PanelConfig,
    ) -> Result<(), PanelError<SPI::Error>> {
        config.validate()?;
        self.ready = false;
        self.width = config.geometry.width;
        self.height = config.geometry.height;
        self.backlight_active_high = config.backlight_active_high;
        self.set_backlight(false);

        // Hardware reset (modules with RESET tied high skip this harmlessly)
        self.rst.set_high();
        delay.delay_ms(10).await;
        self.rst.set_low();
        delay.delay_ms(10).await;
        self.rst.set_high();
        delay.delay_ms(120).await;

        self.command(cmd::SWRESET, &[]).await?;
        delay.delay_ms(150).await;
        self.command(cmd::SLPOUT, &[]).await?;
        delay.delay_ms(120).await;

        self.command(cmd::CSCON, &[0xC3]).await?;
        self.command(cmd::CSCON, &[0x96]).await?;
        self.command(cmd::COLMOD, &[PIXEL_FORMAT_16BPP]).await?;
        self.set_orientation(config.orientation, config.color_order)
            .await?;
        self.set_inverted(config.invert_color).await?;
        self.command(cmd::CSCON, &[0x3C]).await?;
        self.command(cmd::CSCON, &[0x69]).await?;

        self.set_gap(config.gap_x, config.gap_y);
        self.command(cmd::NORON, &[]).await?;
        self.set_display_on(true).await?;
        delay.delay_ms(20).await;

        self.set_backlight(true);
        self.ready = true;
        Ok(())
    }

    /// True once `init` completed
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Program MADCTL (scan direction and color order)
    pub async fn set_orientation(
        &mut self,
        orientation: Orientation,
        order: ColorOrder,
    ) -> Result<(), PanelError<SPI::Error>> {
        self.madctl = madctl::from_orientation(orientation, order);
        self.command(cmd::MADCTL, &[self.madctl]).await
    }

    /// Offset of the visible area inside controller RAM
    pub fn set_gap(&mut self, gap_x: u16, gap_y: u16) {
        self.gap_x = gap_x;
        self.gap_y = gap_y;
    }

    /// Color inversion (IPS modules usually need it on)
    pub async fn set_inverted(&mut self, inverted: bool) -> Result<(), PanelError<SPI::Error>> {
        let op = if inverted { cmd::INVON } else { cmd::INVOFF };
        self.command(op, &[]).await
    }

    pub async fn set_display_on(&mut self, on: bool) -> Result<(), PanelError<SPI::Error>> {
        let op = if on { cmd::DISPON } else { cmd::DISPOFF };
        self.command(op, &[]).await
    }

    /// Drive the backlight enable line, honoring its polarity
    pub fn set_backlight(&mut self, on: bool) {
        self.bl.set_state(on == self.backlight_active_high);
    }

    /// Set the RAM write window for an exclusive region
    pub async fn set_window(&mut self, region: Region) -> Result<(), PanelError<SPI::Error>> {
        let x1 = region.x1 + self.gap_x;
        let x2 = region.x2 - 1 + self.gap_x;
        let y1 = region.y1 + self.gap_y;
        let y2 = region.y2 - 1 + self.gap_y;

        let [x1h, x1l] = x1.to_be_bytes();
        let [x2h, x2l] = x2.to_be_bytes();
        self.command(cmd::CASET, &[x1h, x1l, x2h, x2l]).await?;

        let [y1h, y1l] = y1.to_be_bytes();
        let [y2h, y2l] = y2.to_be_bytes();
        self.command(cmd::RASET, &[y1h, y1l, y2h, y2l]).await
    }

    /// Write one region of pixels
    ///
    /// `pixels` are already in wire byte order and must cover the region
    /// exactly.
    pub async fn write_pixels(
        &mut self,
        region: Region,
        pixels: &[u16],
    ) -> Result<(), PanelError<SPI::Error>> {
        if !self.ready {
            return Err(PanelError::NotReady);
        }
        if region.x2 > self.width || region.y2 > self.height {
            return Err(PanelError::Region(RegionError::OutOfBounds));
        }
        if pixels.len() != region.pixel_count() {
            return Err(PanelError::LengthMismatch);
        }

        self.set_window(region).await?;
        self.command(cmd::RAMWR, &[]).await?;
        self.dc.set_high();
        self.spi
            .write(bytemuck::cast_slice(pixels))
            .await
            .map_err(PanelError::Spi)
    }

    /// Send a command byte and its parameters
    async fn command(&mut self, op: u8, params: &[u8]) -> Result<(), PanelError<SPI::Error>> {
        self.dc.set_low();
        self.spi.write(&[op]).await.map_err(PanelError::Spi)?;
        if !params.is_empty() {
            self.dc.set_high();
            self.spi.write(params).await.map_err(PanelError::Spi)?;
        }
        Ok(())
    }
}

impl<SPI, DC, RST, BL> TransferChannel for St7796<SPI, DC, RST, BL>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    type Error = PanelError<SPI::Error>;

    async fn write_region(&mut self, region: Region, pixels: &[u16]) -> Result<(), Self::Error> {
        self.write_pixels(region, pixels).await
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::cell::{Cell, RefCell};
    use std::vec;
    use std::vec::Vec;

    use super::*;
    use embassy_futures::block_on;
    use embedded_hal::spi::{ErrorKind, ErrorType, Operation};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BusFault;

    impl embedded_hal::spi::Error for BusFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// One SPI write with the D/C level at the time
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Frame {
        data: bool,
        bytes: Vec<u8>,
    }

    struct MockSpi<'a> {
        dc: &'a Cell<bool>,
        frames: &'a RefCell<Vec<Frame>>,
        fail: bool,
    }

    impl ErrorType for MockSpi<'_> {
        type Error = BusFault;
    }

    impl SpiDevice for MockSpi<'_> {
        async fn transaction(
            &mut self,
            operations: &mut [Operation<'_, u8>],
        ) -> Result<(), BusFault> {
            if self.fail {
                return Err(BusFault);
            }
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    self.frames.borrow_mut().push(Frame {
                        data: self.dc.get(),
                        bytes: bytes.to_vec(),
                    });
                }
            }
            Ok(())
        }
    }

    struct MockPin<'a> {
        level: &'a Cell<bool>,
    }

    impl OutputPin for MockPin<'_> {
        fn set_high(&mut self) {
            self.level.set(true);
        }

        fn set_low(&mut self) {
            self.level.set(false);
        }

        fn is_set_high(&self) -> bool {
            self.level.get()
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    struct Rig {
        dc: Cell<bool>,
        rst: Cell<bool>,
        bl: Cell<bool>,
        frames: RefCell<Vec<Frame>>,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                dc: Cell::new(false),
                rst: Cell::new(false),
                bl: Cell::new(false),
                frames: RefCell::new(Vec::new()),
            }
        }

        fn panel(&self, fail: bool) -> TestPanel<'_> {
            St7796::new(
                MockSpi {
                    dc: &self.dc,
                    frames: &self.frames,
                    fail,
                },
                MockPin { level: &self.dc },
                MockPin { level: &self.rst },
                MockPin { level: &self.bl },
            )
        }

        /// Commands sent so far, with their parameters
        fn commands(&self) -> Vec<(u8, Vec<u8>)> {
            let mut out: Vec<(u8, Vec<u8>)> = Vec::new();
            for frame in self.frames.borrow().iter() {
                if frame.data {
                    if let Some(last) = out.last_mut() {
                        last.1.extend_from_slice(&frame.bytes);
                    }
                } else {
                    out.push((frame.bytes[0], Vec::new()));
                }
            }
            out
        }
    }

    type TestPanel<'a> = St7796<MockSpi<'a>, MockPin<'a>, MockPin<'a>, MockPin<'a>>;

    fn init(panel: &mut TestPanel<'_>, config: &PanelConfig) {
        let mut delay = MockDelay::default();
        block_on(panel.init(&mut delay, config)).unwrap();
        assert!(delay.total_ns >= 300_000_000);
    }

    #[test]
    fn test_init_sequence() {
        let rig = Rig::new();
        let mut panel = rig.panel(false);
        init(&mut panel, &PanelConfig::default());

        let ops: Vec<u8> = rig.commands().iter().map(|c| c.0).collect();
        assert_eq!(ops[0], cmd::SWRESET);
        assert_eq!(ops[1], cmd::SLPOUT);
        assert!(ops.contains(&cmd::COLMOD));
        assert_eq!(ops.last(), Some(&cmd::DISPON));

        let commands = rig.commands();
        let colmod = commands.iter().find(|c| c.0 == cmd::COLMOD).unwrap();
        assert_eq!(colmod.1, vec![PIXEL_FORMAT_16BPP]);
        let scan = commands.iter().find(|c| c.0 == cmd::MADCTL).unwrap();
        assert_eq!(scan.1, vec![madctl::MV]);
        assert!(ops.contains(&cmd::INVOFF));

        assert!(panel.is_ready());
        assert!(rig.rst.get());
        assert!(rig.bl.get());
    }

    #[test]
    fn test_init_rejects_bad_config() {
        let rig = Rig::new();
        let mut panel = rig.panel(false);
        let mut config = PanelConfig::default();
        config.tick_ms = 0;
        let mut delay = MockDelay::default();

        assert!(matches!(
            block_on(panel.init(&mut delay, &config)),
            Err(PanelError::Config(_))
        ));
        assert!(rig.frames.borrow().is_empty());
        assert!(!panel.is_ready());
    }

    #[test]
    fn test_init_bus_failure_is_reported() {
        let rig = Rig::new();
        let mut panel = rig.panel(true);
        let mut delay = MockDelay::default();

        assert_eq!(
            block_on(panel.init(&mut delay, &PanelConfig::default())),
            Err(PanelError::Spi(BusFault))
        );
        assert!(!panel.is_ready());
        assert!(!rig.bl.get());
    }

    #[test]
    fn test_window_is_inclusive_with_gap() {
        let rig = Rig::new();
        let mut panel = rig.panel(false);
        let mut config = PanelConfig::default();
        config.geometry.height = 300;
        config.gap_y = 16;
        init(&mut panel, &config);
        rig.frames.borrow_mut().clear();

        let region = Region::new(0, 0, 10, 10).unwrap();
        let pixels = [0u16; 100];
        block_on(panel.write_region(region, &pixels)).unwrap();

        let commands = rig.commands();
        assert_eq!(commands[0], (cmd::CASET, vec![0, 0, 0, 9]));
        assert_eq!(commands[1], (cmd::RASET, vec![0, 16, 0, 25]));
        assert_eq!(commands[2].0, cmd::RAMWR);
        assert_eq!(commands[2].1.len(), 200);
    }

    #[test]
    fn test_pixels_sent_as_stored() {
        let rig = Rig::new();
        let mut panel = rig.panel(false);
        init(&mut panel, &PanelConfig::default());
        rig.frames.borrow_mut().clear();

        // Words already byte-swapped in memory go out unchanged
        let region = Region::new(470, 310, 472, 311).unwrap();
        let pixels = [0x1234u16, 0xABCD];
        block_on(panel.write_region(region, &pixels)).unwrap();

        let frames = rig.frames.borrow();
        let last = frames.last().unwrap();
        assert!(last.data);
        assert_eq!(last.bytes, bytemuck::cast_slice::<u16, u8>(&pixels).to_vec());
    }

    #[test]
    fn test_write_before_init_refused() {
        let rig = Rig::new();
        let mut panel = rig.panel(false);
        let region = Region::new(0, 0, 1, 1).unwrap();

        assert_eq!(
            block_on(panel.write_region(region, &[0])),
            Err(PanelError::NotReady)
        );
        assert!(rig.frames.borrow().is_empty());
    }

    #[test]
    fn test_write_outside_panel_refused() {
        let rig = Rig::new();
        let mut panel = rig.panel(false);
        init(&mut panel, &PanelConfig::default());

        let region = Region::new(0, 300, 1, 321).unwrap();
        let pixels = [0u16; 21];
        assert!(matches!(
            block_on(panel.write_region(region, &pixels)),
            Err(PanelError::Region(_))
        ));
    }

    #[test]
    fn test_short_pixel_slice_refused() {
        let rig = Rig::new();
        let mut panel = rig.panel(false);
        init(&mut panel, &PanelConfig::default());
        rig.frames.borrow_mut().clear();

        let region = Region::new(0, 0, 4, 2).unwrap();
        let pixels = [0u16; 7];
        assert_eq!(
            block_on(panel.write_region(region, &pixels)),
            Err(PanelError::LengthMismatch)
        );
        assert!(rig.frames.borrow().is_empty());
    }

    #[test]
    fn test_backlight_polarity() {
        let rig = Rig::new();
        let mut panel = rig.panel(false);
        let mut config = PanelConfig::default();
        config.backlight_active_high = false;
        init(&mut panel, &config);
        assert!(!rig.bl.get());

        panel.set_backlight(false);
        assert!(rig.bl.get());
    }
}
